//! `[resolve]` and `[collections.<name>]` configuration.

use super::defaults;
use crate::resolve::{Collection, ResolveOptions, StrategyKind};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[resolve]` section in lode.toml - knobs shared by every collection.
///
/// # Example
/// ```toml
/// [resolve]
/// timeout = 10                    # seconds per strategy
/// request_timeout = 5             # seconds per request
/// extensions = ["json", "md"]
/// probe_end = 30
/// strategies = ["manifest", "probe"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Time budget of one strategy attempt, in seconds.
    #[serde(default = "defaults::resolve::timeout")]
    #[educe(Default = defaults::resolve::timeout())]
    pub timeout: u64,

    /// Timeout of a single HTTP request, in seconds.
    #[serde(default = "defaults::resolve::request_timeout")]
    #[educe(Default = defaults::resolve::request_timeout())]
    pub request_timeout: u64,

    /// File extensions recognized as content.
    #[serde(default = "defaults::resolve::extensions")]
    #[educe(Default = defaults::resolve::extensions())]
    pub extensions: Vec<String>,

    #[serde(default = "defaults::resolve::probe_start")]
    #[educe(Default = defaults::resolve::probe_start())]
    pub probe_start: u32,

    #[serde(default = "defaults::resolve::probe_end")]
    #[educe(Default = defaults::resolve::probe_end())]
    pub probe_end: u32,

    /// Strategy order for collections that do not set their own.
    #[serde(default = "defaults::resolve::strategies")]
    #[educe(Default = defaults::resolve::strategies())]
    pub strategies: Vec<StrategyKind>,

    #[serde(default = "defaults::resolve::user_agent")]
    #[educe(Default = defaults::resolve::user_agent())]
    pub user_agent: String,
}

impl ResolveConfig {
    pub fn to_options(&self) -> ResolveOptions {
        ResolveOptions {
            timeout: Duration::from_secs(self.timeout),
            extensions: self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            probe_start: self.probe_start,
            probe_end: self.probe_end,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// `[collections.<name>]` - per-collection overrides.
///
/// # Example
/// ```toml
/// [collections.projects]
/// group_by_status = true
///
/// [collections.about]
/// item = "section"
/// ignore = ["activities.json"]
/// legacy = ["biz-kimiz.json", "faaliyet-alanlari.json"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Stem of numbered files; defaults to the name without a plural `s`.
    #[serde(default)]
    pub item: Option<String>,

    #[serde(default = "defaults::r#false")]
    pub group_by_status: bool,

    /// File names that are never content.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Historical file names for the `legacy` strategy.
    #[serde(default)]
    pub legacy: Vec<String>,

    /// Strategy order for this collection only.
    #[serde(default)]
    pub strategies: Option<Vec<StrategyKind>>,
}

impl CollectionConfig {
    pub fn to_collection(&self, name: &str, fallback: &[StrategyKind]) -> Collection {
        Collection {
            name: name.to_owned(),
            item: self.item.clone(),
            group_by_status: self.group_by_status,
            ignore: self.ignore.clone(),
            legacy: self.legacy.clone(),
            strategies: self
                .strategies
                .clone()
                .unwrap_or_else(|| fallback.to_vec()),
        }
    }
}
