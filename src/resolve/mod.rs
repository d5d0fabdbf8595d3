//! Resilient content resolution.
//!
//! A [`Resolver`] turns a collection name into a [`ResolvedCollection`] by
//! walking an ordered list of [`Strategy`] values and stopping at the first
//! one that yields records. It never fails: when every strategy comes up
//! empty the caller gets [`Resolution::Unavailable`] and keeps showing its
//! static fallback.
//!
//! # Flow
//!
//! ```text
//! resolve("projects")
//!     │
//!     ├── listing     ──✗──┐  (404, parse error, empty, timeout)
//!     ├── repository  ──✗──┤   logged, next strategy
//!     ├── manifest    ──✓──┴──► sort by `order` ──► group by `status`?
//!     ├── probe            (never attempted)
//!     └── legacy           (never attempted)
//! ```
//!
//! Each attempt gets its own time budget through [`Deadline`].

mod error;
mod listing;
mod strategies;
mod strategy;

pub use error::StrategyError;
pub use listing::linked_files;
pub use strategies::{
    DirectoryListing, EnumeratedProbe, IndexManifest, LegacyFiles, MANIFEST_FILE, RepositoryApi,
};
pub use strategy::{Context, Strategy, StrategyKind, parse_file};

use crate::{
    content::{ContentRecord, ResolvedCollection},
    fetch::{Deadline, Fetch, FetchError},
    log,
};
use std::{ops::RangeInclusive, time::Duration};

// ============================================================================
// Inputs
// ============================================================================

/// Where content lives.
#[derive(Debug, Clone)]
pub struct Source {
    /// Site origin, e.g. `https://example.com`
    pub base_url: String,
    /// Content directory below the origin, e.g. `content`
    pub content: String,
    /// Hosted repository holding the same directory, if any
    pub repository: Option<Repository>,
}

impl Source {
    /// `<base>/<content>` without a trailing slash.
    pub fn content_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.content.trim_matches('/') {
            "" => base.to_owned(),
            content => format!("{base}/{content}"),
        }
    }
}

/// A repository reachable through a contents API.
#[derive(Debug, Clone)]
pub struct Repository {
    /// API origin, e.g. `https://api.github.com`
    pub api: String,
    pub owner: String,
    pub repo: String,
    /// Branch or tag; the default branch when `None`
    pub branch: Option<String>,
    /// Content directory inside the repository
    pub path: String,
}

impl Repository {
    /// Contents API URL for a collection directory.
    pub fn contents_url(&self, collection: &str) -> String {
        let api = self.api.trim_end_matches('/');
        let dir = match self.path.trim_matches('/') {
            "" => collection.to_owned(),
            path => format!("{path}/{collection}"),
        };
        let mut url = format!("{api}/repos/{}/{}/contents/{dir}", self.owner, self.repo);
        if let Some(branch) = &self.branch {
            url.push_str("?ref=");
            url.push_str(&urlencoding::encode(branch));
        }
        url
    }
}

/// A named content collection and how to look for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Directory name below the content root, e.g. `projects`
    pub name: String,
    /// Stem of numbered files (`project` for `project-3.json`)
    pub item: Option<String>,
    pub group_by_status: bool,
    /// Sentinel file names never loaded as content
    pub ignore: Vec<String>,
    /// Historical file names for the last-resort strategy
    pub legacy: Vec<String>,
    /// Strategies to try, in order
    pub strategies: Vec<StrategyKind>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: None,
            group_by_status: false,
            ignore: Vec::new(),
            legacy: Vec::new(),
            strategies: StrategyKind::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Stem for numbered files: the configured item, or the name without a plural `s`.
    pub fn item_stem(&self) -> &str {
        if let Some(item) = self.item.as_deref().filter(|i| !i.is_empty()) {
            return item;
        }
        self.name
            .strip_suffix('s')
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.name)
    }

    /// The manifest and configured sentinels are never content.
    pub fn is_ignored(&self, file: &str) -> bool {
        file.eq_ignore_ascii_case(MANIFEST_FILE)
            || self.ignore.iter().any(|name| name.eq_ignore_ascii_case(file))
    }
}

/// Knobs shared by every resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Time budget of one strategy attempt
    pub timeout: Duration,
    /// File extensions recognized as content
    pub extensions: Vec<String>,
    /// First numbered file to probe
    pub probe_start: u32,
    /// Last numbered file to probe (inclusive)
    pub probe_end: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            extensions: vec!["json".into(), "md".into()],
            probe_start: 1,
            probe_end: 20,
        }
    }
}

impl ResolveOptions {
    /// Most numbered files a single probe attempt may request.
    pub const MAX_PROBE_SPAN: u32 = 1000;

    /// Numbers to probe, capped at [`Self::MAX_PROBE_SPAN`] entries.
    pub fn probe_range(&self) -> RangeInclusive<u32> {
        let last = self
            .probe_start
            .saturating_add(Self::MAX_PROBE_SPAN - 1)
            .min(self.probe_end);
        self.probe_start..=last
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// A failed strategy attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub strategy: &'static str,
    pub error: StrategyError,
}

/// Outcome of resolving a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        /// Name of the strategy that produced the records
        strategy: &'static str,
        collection: ResolvedCollection,
    },
    /// Every strategy failed; keep the static fallback.
    Unavailable { attempts: Vec<Attempt> },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn collection(&self) -> Option<&ResolvedCollection> {
        match self {
            Self::Resolved { collection, .. } => Some(collection),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn into_collection(self) -> Option<ResolvedCollection> {
        match self {
            Self::Resolved { collection, .. } => Some(collection),
            Self::Unavailable { .. } => None,
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Stateless driver of the strategy ladder.
pub struct Resolver<F> {
    fetcher: F,
    source: Source,
    options: ResolveOptions,
}

impl<F: Fetch> Resolver<F> {
    pub fn new(fetcher: F, source: Source, options: ResolveOptions) -> Self {
        Self {
            fetcher,
            source,
            options,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Resolve a collection with its configured strategy list.
    pub fn resolve(&self, collection: &Collection) -> Resolution {
        let strategies: Vec<&dyn Strategy> = collection
            .strategies
            .iter()
            .map(|kind| kind.strategy())
            .collect();
        self.resolve_with(collection, &strategies)
    }

    /// Resolve a collection with an explicit strategy list.
    ///
    /// Strategies after the first success are never attempted.
    pub fn resolve_with(&self, collection: &Collection, strategies: &[&dyn Strategy]) -> Resolution {
        let mut attempts = Vec::new();

        for strategy in strategies {
            match self.attempt(*strategy, collection) {
                Ok(records) => {
                    log!("resolve"; "{}: {} records from {}", collection.name, records.len(), strategy.name());
                    return Resolution::Resolved {
                        strategy: strategy.name(),
                        collection: ResolvedCollection::build(records, collection.group_by_status),
                    };
                }
                Err(error) => {
                    log!("resolve"; "{}: {} failed: {}", collection.name, strategy.name(), error);
                    attempts.push(Attempt {
                        strategy: strategy.name(),
                        error,
                    });
                }
            }
        }

        log!("resolve"; "{}: unavailable, keeping static content", collection.name);
        Resolution::Unavailable { attempts }
    }

    /// Run one strategy under its own deadline.
    fn attempt(
        &self,
        strategy: &dyn Strategy,
        collection: &Collection,
    ) -> Result<Vec<ContentRecord>, StrategyError> {
        let fetch = Deadline::new(&self.fetcher, self.options.timeout);
        let ctx = Context {
            collection,
            source: &self.source,
            options: &self.options,
            fetch: &fetch,
        };

        let records = strategy.attempt(&ctx)?;
        if fetch.tripped() {
            return Err(FetchError::Timeout {
                url: ctx.collection_url(),
            }
            .into());
        }
        if records.is_empty() {
            return Err(StrategyError::EmptyResult);
        }
        Ok(records)
    }

    /// Load a single document such as `contact` or `hero` from the content root.
    ///
    /// Without an extension, `<name>.json` is tried before `<name>.md`.
    /// Returns `None` when neither yields a record.
    pub fn document(&self, name: &str) -> Option<ContentRecord> {
        let name = name.trim_matches('/');
        let candidates: Vec<String> = if has_known_extension(name) {
            vec![name.to_owned()]
        } else {
            vec![format!("{name}.json"), format!("{name}.md")]
        };

        let fetch = Deadline::new(&self.fetcher, self.options.timeout);
        for file in &candidates {
            let url = format!("{}/{file}", self.source.content_url());
            let result = fetch
                .get(&url)
                .map_err(StrategyError::from)
                .and_then(|body| parse_file(file, &body, name));
            match result {
                Ok(records) => {
                    if let Some(record) = records.into_iter().next() {
                        return Some(record);
                    }
                }
                Err(StrategyError::NetworkUnavailable(err)) if err.is_not_found() => {}
                Err(err) => log!("resolve"; "document {}: {}", file, err),
            }
        }

        log!("resolve"; "document {}: unavailable, keeping static content", name);
        None
    }
}

fn has_known_extension(name: &str) -> bool {
    crate::content::FileKind::from_name(name).is_some()
}

// ============================================================================
// Tests
// ============================================================================
