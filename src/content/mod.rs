//! Bilingual content records and the shapes they arrive in.
//!
//! # Architecture
//!
//! ```text
//! raw file ──► .json ──► ContentPayload::from_json() ──┐
//!          └─► .md   ──► frontmatter::parse()  ────────┤
//!                                                      ▼
//!                                         Vec<ContentRecord> (normalized)
//!                                                      │
//!                                                      ▼
//!                                 ResolvedCollection::build(records, group)
//!                                      │                        │
//!                                      ▼                        ▼
//!                                Flat(sorted)        Grouped(by `status`)
//! ```
//!
//! Records carry paired localized fields (`title_tr` / `title_en`) and are
//! read through [`ContentRecord::localized`] with an explicit [`Locale`].

mod collection;
pub mod frontmatter;
mod locale;
mod payload;
mod record;

pub use collection::{ResolvedCollection, StatusGroup};
pub use locale::{Locale, LocaleStore};
pub use payload::ContentPayload;
pub use record::ContentRecord;

use std::path::Path;

/// How a fetched file should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Structured data (`.json`)
    Json,
    /// Text document with a front-matter header (`.md`, `.markdown`)
    Markdown,
}

impl FileKind {
    /// Classify a file name by its extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Extract the file name from a URL or path, dropping query and fragment.
pub fn file_name(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether `name` carries one of the given extensions (case-insensitive).
pub fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_name() {
        assert_eq!(FileKind::from_name("project-1.json"), Some(FileKind::Json));
        assert_eq!(FileKind::from_name("biz-kimiz.JSON"), Some(FileKind::Json));
        assert_eq!(FileKind::from_name("about.md"), Some(FileKind::Markdown));
        assert_eq!(FileKind::from_name("about.markdown"), Some(FileKind::Markdown));
        assert_eq!(FileKind::from_name("logo.png"), None);
        assert_eq!(FileKind::from_name("README"), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("https://x.test/content/projects/a.json"), "a.json");
        assert_eq!(file_name("/content/projects/a.json?ref=main"), "a.json");
        assert_eq!(file_name("b.md#top"), "b.md");
        assert_eq!(file_name("/content/projects/"), "projects");
    }

    #[test]
    fn test_has_extension() {
        let exts = vec!["json".to_string(), "md".to_string()];
        assert!(has_extension("a.json", &exts));
        assert!(has_extension("a.MD", &exts));
        assert!(!has_extension("a.html", &exts));
        assert!(!has_extension("json", &exts));
    }
}
