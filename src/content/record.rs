//! A single bilingual content item.

use super::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One content item (project, about section, contact block).
///
/// A thin wrapper around a JSON object. Every user-visible string is stored
/// twice, as `<field>_tr` and `<field>_en`; legacy spellings are rewritten to
/// that form by [`ContentRecord::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ContentRecord {
    fields: Map<String, Value>,
}

impl ContentRecord {
    /// Build a record from a JSON object, normalizing legacy key spellings.
    pub fn new(fields: Map<String, Value>) -> Self {
        let mut record = Self { fields };
        record.normalize_aliases();
        record
    }

    /// Get a raw field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a raw field value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Display position. Missing or non-numeric values count as 0.
    ///
    /// Accepts integers, floats and numeric strings (`"3"`), since hand-edited
    /// CMS files are not consistent about it.
    pub fn order(&self) -> f64 {
        let order = match self.fields.get("order") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        };
        // `-0` and `"-0"` read as negative zero; fold it into the missing-order bucket.
        if order == 0.0 { 0.0 } else { order }
    }

    /// Grouping tag such as `"ongoing"` or `"completed"`.
    pub fn status(&self) -> Option<&str> {
        self.fields
            .get("status")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Read `<field>_<locale>`, falling back to the other language.
    ///
    /// Returns an empty string only when both variants are absent or empty.
    pub fn localized(&self, field: &str, locale: Locale) -> &str {
        self.localized_text(field, locale)
            .or_else(|| self.localized_text(field, locale.toggle()))
            .unwrap_or_default()
    }

    fn localized_text(&self, field: &str, locale: Locale) -> Option<&str> {
        self.fields
            .get(&format!("{field}_{}", locale.code()))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Flatten paired fields for one locale: `title_tr` / `title_en` become a
    /// single `title` holding [`localized`](Self::localized). Other keys are
    /// copied unchanged, in their original order.
    pub fn localize(&self, locale: Locale) -> Map<String, Value> {
        let mut view = Map::new();
        for (key, value) in &self.fields {
            match localized_stem(key) {
                Some(stem) => {
                    if !view.contains_key(stem) {
                        let text = self.localized(stem, locale);
                        view.insert(stem.to_owned(), Value::String(text.to_owned()));
                    }
                }
                None => {
                    view.insert(key.clone(), value.clone());
                }
            }
        }
        view
    }

    /// Rewrite legacy localized keys to the canonical `<field>_<lang>` form.
    ///
    /// - `titleTr` / `titleEn` → `title_tr` / `title_en`
    /// - `{"title": {"tr": .., "en": ..}}` → `title_tr`, `title_en`
    ///
    /// A canonical key that is already present is never overwritten.
    fn normalize_aliases(&mut self) {
        let mut renames: Vec<(String, String)> = Vec::new();
        let mut nested: Vec<String> = Vec::new();

        for (key, value) in &self.fields {
            if let Some(canonical) = camel_case_alias(key) {
                renames.push((key.clone(), canonical));
            } else if is_localized_object(value) {
                nested.push(key.clone());
            }
        }

        for (alias, canonical) in renames {
            if let Some(value) = self.fields.remove(&alias) {
                self.fields.entry(canonical).or_insert(value);
            }
        }

        for field in nested {
            let Some(Value::Object(mut inner)) = self.fields.remove(&field) else {
                continue;
            };
            for locale in Locale::ALL {
                if let Some(value) = inner.remove(locale.code()) {
                    self.fields
                        .entry(format!("{field}_{}", locale.code()))
                        .or_insert(value);
                }
            }
        }
    }
}

impl From<Map<String, Value>> for ContentRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl From<ContentRecord> for Map<String, Value> {
    fn from(record: ContentRecord) -> Self {
        record.fields
    }
}

/// `title_tr` → `title`; `None` for keys without a language suffix.
fn localized_stem(key: &str) -> Option<&str> {
    Locale::ALL.iter().find_map(|locale| {
        key.strip_suffix(locale.code())?
            .strip_suffix('_')
            .filter(|stem| !stem.is_empty())
    })
}

/// `titleTr` → `title_tr`, `descriptionEn` → `description_en`.
fn camel_case_alias(key: &str) -> Option<String> {
    let (stem, lang) = if let Some(stem) = key.strip_suffix("Tr") {
        (stem, "tr")
    } else {
        (key.strip_suffix("En")?, "en")
    };
    let starts_lower = stem.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if !starts_lower || stem.contains('_') {
        return None;
    }

    let mut snake = String::with_capacity(stem.len() + 4);
    for c in stem.chars() {
        if c.is_ascii_uppercase() {
            snake.push('_');
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake.push('_');
    snake.push_str(lang);
    Some(snake)
}

/// An object whose keys are exactly language codes, e.g. `{"tr": .., "en": ..}`.
fn is_localized_object(value: &Value) -> bool {
    match value {
        Value::Object(map) if !map.is_empty() => map
            .keys()
            .all(|k| Locale::ALL.iter().any(|l| l.code() == k)),
        _ => false,
    }
}
