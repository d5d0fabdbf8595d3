//! The five built-in retrieval strategies.
//!
//! | Strategy           | Discovery                                   | Per-file failures |
//! |--------------------|---------------------------------------------|-------------------|
//! | `DirectoryListing` | anchors in `GET <collection>/`              | fail strategy     |
//! | `RepositoryApi`    | `GET <api>/repos/<o>/<r>/contents/<path>`   | fail strategy     |
//! | `IndexManifest`    | `GET <collection>/index.json`               | fail strategy     |
//! | `EnumeratedProbe`  | `<item>-<n>.json` for n in a bounded range  | skipped           |
//! | `LegacyFiles`      | fixed historical names                      | skipped           |

use super::{
    StrategyError,
    listing::linked_files,
    strategy::{Context, Strategy},
};
use crate::content::ContentRecord;
use serde::Deserialize;
use serde_json::Value;

/// Manifest file name, also a sentinel that content strategies never load.
pub const MANIFEST_FILE: &str = "index.json";

// ============================================================================
// Directory Listing
// ============================================================================

/// Parse the HTML index a static server emits for the collection directory.
pub struct DirectoryListing;

impl Strategy for DirectoryListing {
    fn name(&self) -> &'static str {
        "listing"
    }

    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError> {
        let html = ctx.fetch.get(&format!("{}/", ctx.collection_url()))?;
        let urls: Vec<String> = linked_files(&html)
            .into_iter()
            .filter(|name| ctx.wants(name))
            .map(|name| ctx.file_url(&name))
            .collect();

        if urls.is_empty() {
            return Err(StrategyError::EmptyResult);
        }
        ctx.fetch_all(&urls)
    }
}

// ============================================================================
// Repository API
// ============================================================================

/// Ask the hosting service's contents API for the directory's files.
pub struct RepositoryApi;

/// One entry of a contents API listing.
#[derive(Debug, Deserialize)]
struct RepoEntry {
    name: String,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl Strategy for RepositoryApi {
    fn name(&self) -> &'static str {
        "repository"
    }

    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError> {
        let repository = ctx
            .source
            .repository
            .as_ref()
            .ok_or(StrategyError::NotConfigured("[source.repository]"))?;

        let api_url = repository.contents_url(&ctx.collection.name);
        let body = ctx.fetch.get(&api_url)?;
        let entries: Vec<RepoEntry> =
            serde_json::from_str(&body).map_err(|err| StrategyError::parse(&api_url, err))?;

        let urls: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.kind.as_deref().is_none_or(|kind| kind == "file"))
            .filter(|entry| ctx.wants(&entry.name))
            .filter_map(|entry| entry.download_url)
            .collect();

        if urls.is_empty() {
            return Err(StrategyError::EmptyResult);
        }
        ctx.fetch_all(&urls)
    }
}

// ============================================================================
// Index Manifest
// ============================================================================

/// Read `index.json`, which names the collection's files explicitly.
///
/// Accepted shapes: `{"<collection>": [..]}`, `{"files": [..]}`, `[..]`.
pub struct IndexManifest;

impl IndexManifest {
    fn file_names(manifest: Value, collection: &str) -> Option<Vec<String>> {
        let list = match manifest {
            Value::Array(list) => list,
            Value::Object(mut map) => match map.remove(collection).or_else(|| map.remove("files")) {
                Some(Value::Array(list)) => list,
                _ => return None,
            },
            _ => return None,
        };
        Some(
            list.into_iter()
                .filter_map(|item| match item {
                    Value::String(name) if !name.trim().is_empty() => Some(name.trim().to_owned()),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl Strategy for IndexManifest {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError> {
        let manifest_url = ctx.file_url(MANIFEST_FILE);
        let body = ctx.fetch.get(&manifest_url)?;
        let manifest: Value =
            serde_json::from_str(&body).map_err(|err| StrategyError::parse(MANIFEST_FILE, err))?;

        let names = Self::file_names(manifest, &ctx.collection.name).ok_or_else(|| {
            StrategyError::parse(MANIFEST_FILE, "no file list for this collection")
        })?;

        let urls: Vec<String> = names
            .iter()
            .map(|name| name.rsplit('/').next().unwrap_or(name))
            .filter(|name| *name != MANIFEST_FILE)
            .map(|name| ctx.file_url(name))
            .collect();

        if urls.is_empty() {
            return Err(StrategyError::EmptyResult);
        }
        ctx.fetch_all(&urls)
    }
}

// ============================================================================
// Enumerated Probing
// ============================================================================

/// Try `<item>-1.json` ... `<item>-N.json`; gaps are expected.
pub struct EnumeratedProbe;

impl Strategy for EnumeratedProbe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError> {
        let item = ctx.collection.item_stem();
        let urls: Vec<String> = ctx
            .options
            .probe_range()
            .map(|n| ctx.file_url(&format!("{item}-{n}.json")))
            .collect();
        Ok(ctx.fetch_each(&urls))
    }
}

// ============================================================================
// Legacy Files
// ============================================================================

/// Fetch the fixed file names older deployments used.
pub struct LegacyFiles;

impl Strategy for LegacyFiles {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn attempt(&self, ctx: &Context<'_>) -> Result<Vec<ContentRecord>, StrategyError> {
        if ctx.collection.legacy.is_empty() {
            return Err(StrategyError::NotConfigured("legacy file list"));
        }
        let urls: Vec<String> = ctx
            .collection
            .legacy
            .iter()
            .map(|name| ctx.file_url(name))
            .collect();
        Ok(ctx.fetch_each(&urls))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::testing::MemoryFetcher,
        resolve::{Collection, Repository, ResolveOptions, Source},
    };
    use serde_json::json;

    const BASE: &str = "https://site.test/content/projects";

    fn source(with_repo: bool) -> Source {
        Source {
            base_url: "https://site.test".into(),
            content: "content".into(),
            repository: with_repo.then(|| Repository {
                api: "https://api.host.test".into(),
                owner: "acme".into(),
                repo: "site".into(),
                branch: None,
                path: "content".into(),
            }),
        }
    }

    fn run(
        strategy: &dyn Strategy,
        fetcher: &MemoryFetcher,
        collection: &Collection,
        with_repo: bool,
    ) -> Result<Vec<ContentRecord>, StrategyError> {
        let source = source(with_repo);
        let options = ResolveOptions::default();
        let ctx = Context {
            collection,
            source: &source,
            options: &options,
            fetch: fetcher,
        };
        strategy.attempt(&ctx)
    }

    fn orders(records: &[ContentRecord]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get("order").and_then(Value::as_i64).unwrap())
            .collect()
    }

    #[test]
    fn test_listing_fetches_linked_content() {
        let fetcher = MemoryFetcher::new()
            .route(
                &format!("{BASE}/"),
                r#"<a href="index.json">i</a><a href="a.json">a</a><a href="b.md">b</a><a href="logo.png">l</a>"#,
            )
            .route(&format!("{BASE}/a.json"), r#"{"order": 1}"#)
            .route(&format!("{BASE}/b.md"), "---\norder: 2\n---\n");

        let records = run(&DirectoryListing, &fetcher, &Collection::new("projects"), false).unwrap();
        assert_eq!(orders(&records), vec![1, 2]);
        assert!(!fetcher.requested(&format!("{BASE}/index.json")));
        assert!(!fetcher.requested(&format!("{BASE}/logo.png")));
    }

    #[test]
    fn test_listing_fails_when_one_file_fails() {
        let fetcher = MemoryFetcher::new()
            .route(&format!("{BASE}/"), r#"<a href="a.json">a</a><a href="b.json">b</a>"#)
            .route(&format!("{BASE}/a.json"), r#"{"order": 1}"#)
            .status(&format!("{BASE}/b.json"), 500);

        let err = run(&DirectoryListing, &fetcher, &Collection::new("projects"), false).unwrap_err();
        assert!(matches!(err, StrategyError::NetworkUnavailable(_)));
    }

    #[test]
    fn test_listing_without_content_links_is_empty() {
        let fetcher = MemoryFetcher::new().route(&format!("{BASE}/"), "<p>nothing</p>");
        let err = run(&DirectoryListing, &fetcher, &Collection::new("projects"), false).unwrap_err();
        assert_eq!(err, StrategyError::EmptyResult);
    }

    #[test]
    fn test_repository_filters_sentinels_and_directories() {
        let api = "https://api.host.test/repos/acme/site/contents/content/about";
        let listing = json!([
            {"name": "activities.json", "type": "file", "download_url": "https://raw.test/activities.json"},
            {"name": "index.json", "type": "file", "download_url": "https://raw.test/index.json"},
            {"name": "drafts", "type": "dir", "download_url": null},
            {"name": "biz-kimiz.json", "type": "file", "download_url": "https://raw.test/biz-kimiz.json"},
        ]);
        let fetcher = MemoryFetcher::new()
            .route(api, &listing.to_string())
            .route("https://raw.test/biz-kimiz.json", r#"{"order": 1, "title_tr": "Biz Kimiz"}"#);

        let mut about = Collection::new("about");
        about.ignore.push("activities.json".into());

        let records = run(&RepositoryApi, &fetcher, &about, true).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!fetcher.requested("https://raw.test/activities.json"));
        assert!(!fetcher.requested("https://raw.test/index.json"));
    }

    #[test]
    fn test_repository_requires_configuration() {
        let fetcher = MemoryFetcher::new();
        let err = run(&RepositoryApi, &fetcher, &Collection::new("projects"), false).unwrap_err();
        assert!(matches!(err, StrategyError::NotConfigured(_)));
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn test_repository_error_object_is_parse_failure() {
        let api = "https://api.host.test/repos/acme/site/contents/content/projects";
        let fetcher = MemoryFetcher::new().route(api, r#"{"message": "Not Found"}"#);
        let err = run(&RepositoryApi, &fetcher, &Collection::new("projects"), true).unwrap_err();
        assert!(matches!(err, StrategyError::ParseFailure { .. }));
    }

    #[test]
    fn test_manifest_lists_files() {
        let fetcher = MemoryFetcher::new()
            .route(
                &format!("{BASE}/index.json"),
                r#"{"projects": ["p-2.json", "content/projects/p-1.json"]}"#,
            )
            .route(&format!("{BASE}/p-1.json"), r#"{"order": 1}"#)
            .route(&format!("{BASE}/p-2.json"), r#"[{"order": 2}, {"order": 3}]"#);

        let records = run(&IndexManifest, &fetcher, &Collection::new("projects"), false).unwrap();
        assert_eq!(orders(&records), vec![2, 3, 1]);
    }

    #[test]
    fn test_manifest_without_list_is_parse_failure() {
        let fetcher =
            MemoryFetcher::new().route(&format!("{BASE}/index.json"), r#"{"about": ["a.json"]}"#);
        let err = run(&IndexManifest, &fetcher, &Collection::new("projects"), false).unwrap_err();
        assert!(matches!(err, StrategyError::ParseFailure { .. }));
    }

    #[test]
    fn test_manifest_accepts_files_key_and_bare_array() {
        assert_eq!(
            IndexManifest::file_names(json!({"files": ["a.json"]}), "projects"),
            Some(vec!["a.json".to_string()])
        );
        assert_eq!(
            IndexManifest::file_names(json!(["a.json", 3, " "]), "projects"),
            Some(vec!["a.json".to_string()])
        );
        assert_eq!(IndexManifest::file_names(json!("a.json"), "projects"), None);
    }

    #[test]
    fn test_enumerated_tolerates_gaps() {
        let mut fetcher = MemoryFetcher::new();
        for n in [2, 5, 9] {
            fetcher = fetcher.route(
                &format!("{BASE}/project-{n}.json"),
                &format!(r#"{{"order": {n}}}"#),
            );
        }

        let records = run(&EnumeratedProbe, &fetcher, &Collection::new("projects"), false).unwrap();
        assert_eq!(orders(&records), vec![2, 5, 9]);
        assert_eq!(fetcher.requests().len(), 20);
    }

    #[test]
    fn test_enumerated_skips_broken_files() {
        let fetcher = MemoryFetcher::new()
            .route(&format!("{BASE}/project-1.json"), "{broken")
            .route(&format!("{BASE}/project-3.json"), r#"{"order": 3}"#)
            .status(&format!("{BASE}/project-4.json"), 503);

        let records = run(&EnumeratedProbe, &fetcher, &Collection::new("projects"), false).unwrap();
        assert_eq!(orders(&records), vec![3]);
    }

    #[test]
    fn test_legacy_fixed_names() {
        let about = "https://site.test/content/about";
        let fetcher = MemoryFetcher::new()
            .route(&format!("{about}/faaliyet-alanlari.json"), r#"{"order": 2}"#);

        let mut collection = Collection::new("about");
        collection.legacy = vec!["biz-kimiz.json".into(), "faaliyet-alanlari.json".into()];

        let records = run(&LegacyFiles, &fetcher, &collection, false).unwrap();
        assert_eq!(orders(&records), vec![2]);
    }

    #[test]
    fn test_legacy_without_names_is_not_configured() {
        let fetcher = MemoryFetcher::new();
        let err = run(&LegacyFiles, &fetcher, &Collection::new("about"), false).unwrap_err();
        assert!(matches!(err, StrategyError::NotConfigured(_)));
    }
}
