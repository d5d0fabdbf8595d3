//! The strategy contract and the helpers every strategy shares.

use super::{Collection, ResolveOptions, Source, StrategyError};
use crate::{
    content::{ContentPayload, ContentRecord, FileKind, file_name, frontmatter, has_extension},
    fetch::Fetch,
    log,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One self-contained way of locating and fetching a collection.
pub trait Strategy: Sync {
    /// Short name used in logs and results.
    fn name(&self) -> &'static str;

    /// Produce the collection's records, or fail.
    ///
    /// An `Ok` with an empty vector is treated as [`StrategyError::EmptyResult`].
    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError>;
}

/// The built-in strategies, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Served directory listing
    Listing,
    /// Hosted repository contents API
    Repository,
    /// `index.json` manifest
    Manifest,
    /// Numbered files `<item>-<n>.json`
    Probe,
    /// Fixed historical file names
    Legacy,
}

impl StrategyKind {
    pub const DEFAULT_ORDER: [StrategyKind; 5] = [
        Self::Listing,
        Self::Repository,
        Self::Manifest,
        Self::Probe,
        Self::Legacy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Repository => "repository",
            Self::Manifest => "manifest",
            Self::Probe => "probe",
            Self::Legacy => "legacy",
        }
    }

    /// The stateless implementation behind this kind.
    pub fn strategy(self) -> &'static dyn Strategy {
        use super::strategies::{
            DirectoryListing, EnumeratedProbe, IndexManifest, LegacyFiles, RepositoryApi,
        };
        match self {
            Self::Listing => &DirectoryListing,
            Self::Repository => &RepositoryApi,
            Self::Manifest => &IndexManifest,
            Self::Probe => &EnumeratedProbe,
            Self::Legacy => &LegacyFiles,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a strategy may look at while it runs.
pub struct Context<'a> {
    pub collection: &'a Collection,
    pub source: &'a Source,
    pub options: &'a ResolveOptions,
    /// Deadline-bounded fetcher for this attempt
    pub fetch: &'a dyn Fetch,
}

impl Context<'_> {
    /// `<base>/<content>/<collection>`, without a trailing slash.
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.source.content_url(), self.collection.name)
    }

    /// URL of a file inside the collection directory.
    pub fn file_url(&self, name: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(name))
    }

    /// Whether a discovered file should be loaded: recognized extension and
    /// not a sentinel.
    pub fn wants(&self, name: &str) -> bool {
        has_extension(name, &self.options.extensions) && !self.collection.is_ignored(name)
    }

    /// Fetch every URL in parallel and parse them all; any failure fails the whole set.
    pub fn fetch_all(&self, urls: &[String]) -> Result<Vec<ContentRecord>, StrategyError> {
        let parsed: Vec<Vec<ContentRecord>> = urls
            .par_iter()
            .map(|url| {
                let body = self.fetch.get(url)?;
                parse_file(file_name(url), &body, &self.collection.name)
            })
            .collect::<Result<_, _>>()?;
        Ok(parsed.into_iter().flatten().collect())
    }

    /// Fetch every URL in parallel, skipping the ones that fail.
    ///
    /// Results keep the order of `urls`.
    pub fn fetch_each(&self, urls: &[String]) -> Vec<ContentRecord> {
        let parsed: Vec<Vec<ContentRecord>> = urls
            .par_iter()
            .map(|url| {
                let result = self
                    .fetch
                    .get(url)
                    .map_err(StrategyError::from)
                    .and_then(|body| parse_file(file_name(url), &body, &self.collection.name));
                match result {
                    Ok(records) => records,
                    Err(StrategyError::NetworkUnavailable(err)) if err.is_not_found() => Vec::new(),
                    Err(err) => {
                        log!("fetch"; "skipping {}: {}", url, err);
                        Vec::new()
                    }
                }
            })
            .collect();
        parsed.into_iter().flatten().collect()
    }
}

/// Turn one file's text into records according to its extension.
///
/// - `.json`: parse errors are failures; the value goes through [`ContentPayload`].
/// - `.md`: front-matter only; a document without a header yields nothing.
/// - anything else: JSON if it parses, otherwise front-matter, otherwise nothing.
pub fn parse_file(
    name: &str,
    body: &str,
    collection: &str,
) -> Result<Vec<ContentRecord>, StrategyError> {
    let from_json = |value: serde_json::Value| {
        ContentPayload::from_json(value, collection)
            .map(ContentPayload::into_records)
            .unwrap_or_default()
    };

    match FileKind::from_name(name) {
        Some(FileKind::Json) => serde_json::from_str(body)
            .map(from_json)
            .map_err(|err| StrategyError::parse(name, err)),
        Some(FileKind::Markdown) => Ok(markdown(body)),
        None => Ok(serde_json::from_str(body)
            .map(from_json)
            .unwrap_or_else(|_| markdown(body))),
    }
}

fn markdown(body: &str) -> Vec<ContentRecord> {
    frontmatter::parse(body)
        .filter(|record| !record.is_empty())
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_array() {
        let records = parse_file("a.json", r#"[{"order": 1}, {"order": 2}]"#, "projects").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_json_error_is_failure() {
        let err = parse_file("a.json", "{oops", "projects").unwrap_err();
        assert!(matches!(err, StrategyError::ParseFailure { ref file, .. } if file == "a.json"));
    }

    #[test]
    fn test_parse_markdown() {
        let records = parse_file("a.md", "---\norder: 3\n---\nbody", "about").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("order"), Some(&json!(3)));
    }

    #[test]
    fn test_markdown_without_header_yields_nothing() {
        assert!(parse_file("a.md", "# Just a heading", "about").unwrap().is_empty());
        assert!(parse_file("a.md", "---\n---\n", "about").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_extension_sniffs() {
        assert_eq!(parse_file("a", r#"{"x": 1}"#, "c").unwrap().len(), 1);
        assert_eq!(parse_file("a", "---\nx: 1\n---", "c").unwrap().len(), 1);
        assert!(parse_file("a", "plain", "c").unwrap().is_empty());
    }

    #[test]
    fn test_json_null_yields_nothing() {
        assert!(parse_file("a.json", "null", "c").unwrap().is_empty());
    }
}
