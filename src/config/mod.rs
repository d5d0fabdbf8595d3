//! Project configuration management for `lode.toml`.
//!
//! # Sections
//!
//! | Section                | Purpose                                         |
//! |------------------------|-------------------------------------------------|
//! | `[source]`             | Site origin and content directory               |
//! | `[source.repository]`  | Hosted repository for the `repository` strategy |
//! | `[resolve]`            | Timeouts, extensions, probe range, strategies   |
//! | `[collections.<name>]` | Per-collection grouping, sentinels, legacy names|
//! | `[locale]`             | Default display language and its state file     |
//! | `[serve]`              | Preview server (interface, port, root)          |
//!
//! # Example
//!
//! ```toml
//! [source]
//! base_url = "https://example.com"
//!
//! [source.repository]
//! owner = "acme"
//! repo = "example.com"
//!
//! [collections.projects]
//! group_by_status = true
//!
//! [collections.about]
//! ignore = ["activities.json"]
//! legacy = ["biz-kimiz.json", "faaliyet-alanlari.json"]
//! ```

pub mod defaults;
mod error;
mod locale;
mod resolve;
mod serve;
mod source;

pub use error::ConfigError;
pub use locale::LocaleConfig;
pub use resolve::{CollectionConfig, ResolveConfig};
pub use serve::ServeConfig;
pub use source::{RepositoryConfig, SourceConfig};

use crate::{
    cli::{Cli, Commands},
    content::LocaleStore,
    resolve::{Collection, ResolveOptions, Source},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing lode.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LodeConfig {
    /// Project root (set after loading)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Where content is fetched from
    #[serde(default)]
    pub source: SourceConfig,

    /// Strategy settings shared by all collections
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Per-collection settings, keyed by collection name
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,

    /// Display language settings
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl LodeConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: LodeConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    // ------------------------------------------------------------------------
    // Views handed to the resolver
    // ------------------------------------------------------------------------

    pub fn source(&self) -> Source {
        self.source.to_source()
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        self.resolve.to_options()
    }

    /// Settings for `name`; collections missing from the config use defaults.
    pub fn collection(&self, name: &str) -> Collection {
        self.collections
            .get(name)
            .cloned()
            .unwrap_or_default()
            .to_collection(name, &self.resolve.strategies)
    }

    pub fn locale_store(&self) -> LocaleStore {
        LocaleStore::new(&self.locale.state, self.locale.default)
    }

    // ------------------------------------------------------------------------
    // CLI overrides
    // ------------------------------------------------------------------------

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = Self::normalize_path(&root);

        Self::update_option(&mut self.source.base_url, cli.base_url.as_ref());

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }

        self.update_path_with_root(&root);
        self.root = Some(root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative paths against the project root
    fn update_path_with_root(&mut self, root: &Path) {
        self.serve.root = Self::normalize_path(&root.join(&self.serve.root));

        let state = self.locale.state.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&state).into_owned());
        self.locale.state = if expanded.is_relative() {
            Self::normalize_path(&root.join(expanded))
        } else {
            expanded
        };
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let base_url = &self.source.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!(ConfigError::Validation(
                "[source.base_url] must start with http:// or https://".into()
            ));
        }

        if let Some(repository) = &self.source.repository
            && (repository.owner.trim().is_empty() || repository.repo.trim().is_empty())
        {
            bail!(ConfigError::Validation(
                "[source.repository] needs non-empty `owner` and `repo`".into()
            ));
        }

        if self.resolve.timeout == 0 || self.resolve.request_timeout == 0 {
            bail!(ConfigError::Validation(
                "[resolve] timeouts must be at least one second".into()
            ));
        }

        if self.resolve.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[resolve.extensions] must have at least one element".into()
            ));
        }

        if self.resolve.probe_end < self.resolve.probe_start {
            bail!(ConfigError::Validation(
                "[resolve.probe_end] is below [resolve.probe_start]".into()
            ));
        }

        if self.resolve.probe_end - self.resolve.probe_start >= ResolveOptions::MAX_PROBE_SPAN {
            bail!(ConfigError::Validation(format!(
                "[resolve] probe range may cover at most {} files",
                ResolveOptions::MAX_PROBE_SPAN
            )));
        }

        for (name, collection) in &self.collections {
            if name.is_empty() || name.contains('/') {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}] is not a valid directory name"
                )));
            }
            if collection.strategies.as_ref().is_some_and(Vec::is_empty) {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}.strategies] must have at least one element"
                )));
            }
        }

        if self.resolve.strategies.is_empty() {
            bail!(ConfigError::Validation(
                "[resolve.strategies] must have at least one element".into()
            ));
        }

        match &cli.command {
            Commands::Serve { .. } if !self.serve.root.is_dir() => {
                bail!(ConfigError::Validation(format!(
                    "[serve.root] `{}` is not a directory",
                    self.serve.root.display()
                )))
            }
            Commands::Resolve { collection, .. } if collection.contains('/') => {
                bail!("collection name `{collection}` must not contain `/`")
            }
            _ => {}
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
