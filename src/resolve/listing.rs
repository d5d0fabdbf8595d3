//! Directory listing pages: extract the file names a server links to.

use crate::content::file_name;
use regex::Regex;
use std::sync::LazyLock;

static RE_ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap()
});

/// File names linked from an HTML directory listing, in document order.
///
/// Each href is reduced to its last path segment and URL-decoded. Parent
/// links, directory links, fragments and duplicates are dropped.
pub fn linked_files(html: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in RE_ANCHOR_HREF.captures_iter(html) {
        let Some(href) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
            continue;
        };
        let href = href.as_str().trim();
        if href.is_empty() || href.starts_with('#') || href.ends_with('/') {
            continue;
        }

        let raw = file_name(href);
        let name = urlencoding::decode(raw)
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_else(|_| raw.to_owned());
        if name.is_empty() || name == ".." || name.starts_with('.') {
            continue;
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apache_style_listing() {
        let html = r#"
            <html><body><h1>Index of /content/projects</h1>
            <a href="/content/">Parent Directory</a>
            <a href="project-1.json">project-1.json</a>
            <a href="project-2.json">project-2.json</a>
            <a href="notes.md">notes.md</a>
            </body></html>
        "#;
        assert_eq!(
            linked_files(html),
            vec!["project-1.json", "project-2.json", "notes.md"]
        );
    }

    #[test]
    fn test_absolute_and_quoted_variants() {
        let html = r#"
            <a class="x" HREF='/content/about/biz-kimiz.json'>a</a>
            <a href=https://cdn.test/content/about/faaliyet%20alanlari.json>b</a>
            <a href="/content/about/biz-kimiz.json?v=2">dup</a>
        "#;
        assert_eq!(
            linked_files(html),
            vec!["biz-kimiz.json", "faaliyet alanlari.json"]
        );
    }

    #[test]
    fn test_skips_parents_fragments_and_hidden() {
        let html = r##"
            <a href="../">..</a>
            <a href="#top">top</a>
            <a href="sub/">sub</a>
            <a href=".hidden.json">hidden</a>
            <a href="">empty</a>
        "##;
        assert!(linked_files(html).is_empty());
    }

    #[test]
    fn test_no_anchors() {
        assert!(linked_files("<p>403 Forbidden</p>").is_empty());
    }
}
