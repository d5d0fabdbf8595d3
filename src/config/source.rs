//! `[source]` section configuration.
//!
//! Where the content store lives: a site origin with a content directory,
//! and optionally the repository the same files are committed to.

use super::defaults;
use crate::resolve::{Repository, Source};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[source]` section in lode.toml.
///
/// # Example
/// ```toml
/// [source]
/// base_url = "https://example.com"
/// content = "content"
///
/// [source.repository]
/// owner = "acme"
/// repo = "example.com"
/// branch = "main"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Site origin the content directory is served from.
    #[serde(default = "defaults::source::base_url")]
    #[educe(Default = defaults::source::base_url())]
    pub base_url: String,

    /// Content directory below the origin.
    #[serde(default = "defaults::source::content")]
    #[educe(Default = defaults::source::content())]
    pub content: String,

    /// Repository hosting the content; enables the `repository` strategy.
    #[serde(default)]
    pub repository: Option<RepositoryConfig>,
}

impl SourceConfig {
    pub fn to_source(&self) -> Source {
        Source {
            base_url: self.base_url.clone(),
            content: self.content.clone(),
            repository: self.repository.as_ref().map(RepositoryConfig::to_repository),
        }
    }
}

/// `[source.repository]` - a repository reachable through a contents API.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// API origin.
    #[serde(default = "defaults::source::repository::api")]
    #[educe(Default = defaults::source::repository::api())]
    pub api: String,

    pub owner: String,

    pub repo: String,

    /// Branch or tag; the repository default when unset.
    #[serde(default)]
    pub branch: Option<String>,

    /// Content directory inside the repository.
    #[serde(default = "defaults::source::repository::path")]
    #[educe(Default = defaults::source::repository::path())]
    pub path: String,
}

impl RepositoryConfig {
    pub fn to_repository(&self) -> Repository {
        Repository {
            api: self.api.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            branch: self.branch.clone(),
            path: self.path.clone(),
        }
    }
}
