//! Lode - resilient bilingual content resolution for static sites.
//!
//! A collection such as `projects` is located through an ordered ladder of
//! retrieval strategies (served directory listing, repository contents API,
//! `index.json` manifest, numbered-file probing, legacy file names). The first
//! strategy that yields records wins; when none does, the caller keeps its
//! static fallback.
//!
//! ```no_run
//! use lode::{Collection, HttpFetcher, Locale, ResolveOptions, Resolver, Source};
//! use std::time::Duration;
//!
//! let source = Source {
//!     base_url: "https://example.com".into(),
//!     content: "content".into(),
//!     repository: None,
//! };
//! let fetcher = HttpFetcher::new(Duration::from_secs(8), "lode");
//! let resolver = Resolver::new(fetcher, source, ResolveOptions::default());
//!
//! if let Some(projects) = resolver.resolve(&Collection::new("projects")).into_collection() {
//!     for record in projects.records() {
//!         println!("{}", record.localized("title", Locale::En));
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod fetch;
pub mod logger;
pub mod resolve;
pub mod serve;

pub use content::{ContentRecord, Locale, LocaleStore, ResolvedCollection, StatusGroup};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use resolve::{
    Collection, Resolution, ResolveOptions, Resolver, Source, Strategy, StrategyError,
    StrategyKind,
};
