//! Front-matter header parsing for markdown content files.
//!
//! ```text
//! ---
//! order: 2
//! title_tr: "Biz Kimiz"
//! title_en: 'Who We Are'
//! ---
//! body text (ignored)
//! ```
//!
//! Only flat `key: value` pairs are understood. Values lose one layer of
//! matching quotes and become numbers when they read as a numeric literal.

use super::ContentRecord;
use serde_json::{Map, Number, Value};

/// Block delimiter line.
const MARKER: &str = "---";

/// Parse the first front-matter block of `text` into a record.
///
/// Returns `None` when the document has no opening/closing marker pair.
/// Lines without a colon and lines with an empty key are skipped.
pub fn parse(text: &str) -> Option<ContentRecord> {
    let mut lines = text.lines().skip_while(|line| line.trim() != MARKER);
    lines.next()?;

    let mut fields = Map::new();
    let mut closed = false;
    for line in lines {
        if line.trim() == MARKER {
            closed = true;
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_owned(), coerce(unquote(value.trim())));
    }

    closed.then(|| ContentRecord::new(fields))
}

/// Strip a single layer of matching `"` or `'` quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first @ (b'"' | b'\'')), Some(&last)) if value.len() >= 2 && first == last => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}

/// Turn numeric-looking text into a JSON number, anything else into a string.
fn coerce(value: &str) -> Value {
    if !is_numeric_literal(value) {
        return Value::String(value.to_owned());
    }
    if let Ok(int) = value.parse::<i64>() {
        return Value::Number(int.into());
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(value.to_owned()), Value::Number)
}

/// Decimal literal check: rejects `inf`, `NaN` and friends that `f64::from_str` accepts.
fn is_numeric_literal(value: &str) -> bool {
    let digits = value.chars().any(|c| c.is_ascii_digit());
    let charset = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    digits && charset && value.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quotes_stripped_and_number_coerced() {
        let record = parse("---\nkey: \"5\"\nfoo: bar\n---\nbody").unwrap();
        assert_eq!(record.get("key"), Some(&json!(5)));
        assert_eq!(record.get("foo"), Some(&json!("bar")));
        assert_eq!(record.fields().len(), 2);
    }

    #[test]
    fn test_single_quotes_and_floats() {
        let record = parse("---\ntitle_en: 'Who We Are'\nratio: 2.5\n---\n").unwrap();
        assert_eq!(record.get("title_en"), Some(&json!("Who We Are")));
        assert_eq!(record.get("ratio"), Some(&json!(2.5)));
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let record = parse("---\nimage: https://cdn.test/a.png\n---").unwrap();
        assert_eq!(record.get("image"), Some(&json!("https://cdn.test/a.png")));
    }

    #[test]
    fn test_skips_lines_without_colon_and_empty_keys() {
        let record = parse("---\njust text\n: orphan\norder: 1\n---").unwrap();
        assert_eq!(record.fields().len(), 1);
        assert_eq!(record.order(), 1.0);
    }

    #[test]
    fn test_leading_content_before_marker() {
        let record = parse("\n\n---\nstatus: completed\n---\n").unwrap();
        assert_eq!(record.status(), Some("completed"));
    }

    #[test]
    fn test_crlf_lines() {
        let record = parse("---\r\norder: 4\r\ntitle_tr: Okul\r\n---\r\n").unwrap();
        assert_eq!(record.get("order"), Some(&json!(4)));
        assert_eq!(record.get("title_tr"), Some(&json!("Okul")));
    }

    #[test]
    fn test_missing_markers_yield_nothing() {
        assert!(parse("no header at all").is_none());
        assert!(parse("---\norder: 1\nnever closed").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_non_numeric_lookalikes_stay_strings() {
        let record = parse("---\na: inf\nb: NaN\nc: 1-2\nd: \"\"\ne: 2024-01-15\n---").unwrap();
        assert_eq!(record.get("a"), Some(&json!("inf")));
        assert_eq!(record.get("b"), Some(&json!("NaN")));
        assert_eq!(record.get("c"), Some(&json!("1-2")));
        assert_eq!(record.get("d"), Some(&json!("")));
        assert_eq!(record.get("e"), Some(&json!("2024-01-15")));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"a'"), "\"a'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\"x\"\""), "\"x\"");
    }

    #[test]
    fn test_coerce_negative_and_exponent() {
        assert_eq!(coerce("-3"), json!(-3));
        assert_eq!(coerce("1e3"), json!(1000.0));
    }
}
