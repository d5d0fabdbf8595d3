//! Normalization of heterogeneous JSON response shapes.

use super::ContentRecord;
use serde_json::Value;

/// Keys that wrap a record list in a single-key object, besides the collection name.
const WRAPPER_KEYS: &[&str] = &["sections", "items"];

/// What one content file contained.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPayload {
    Single(ContentRecord),
    Many(Vec<ContentRecord>),
}

impl ContentPayload {
    /// Convert a parsed JSON document into a payload.
    ///
    /// | Shape                                | Result                  |
    /// |--------------------------------------|-------------------------|
    /// | `[{..}, {..}]`                       | `Many` (objects only)   |
    /// | `{"sections": [..]}`                 | `Many` of the inner list |
    /// | `{"<collection>": [..]}`             | `Many` of the inner list |
    /// | `{..}`                               | `Single`                |
    /// | `null`, `{}`, scalars                | `None`                  |
    pub fn from_json(value: Value, collection: &str) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Many(objects(items))),
            Value::Object(mut map) => {
                let wrapper = (map.len() == 1)
                    .then(|| map.keys().next().cloned())
                    .flatten()
                    .filter(|key| key == collection || WRAPPER_KEYS.contains(&key.as_str()))
                    .filter(|key| matches!(map.get(key), Some(Value::Array(_))));

                if let Some(key) = wrapper
                    && let Some(Value::Array(items)) = map.remove(&key)
                {
                    return Some(Self::Many(objects(items)));
                }

                let record = ContentRecord::new(map);
                (!record.is_empty()).then_some(Self::Single(record))
            }
            _ => None,
        }
    }

    /// Flatten into records, dropping empty ones.
    pub fn into_records(self) -> Vec<ContentRecord> {
        match self {
            Self::Single(record) => vec![record],
            Self::Many(records) => records,
        }
        .into_iter()
        .filter(|record| !record.is_empty())
        .collect()
    }
}

fn objects(items: Vec<Value>) -> Vec<ContentRecord> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(ContentRecord::new(map)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<ContentRecord> {
        ContentPayload::from_json(value, "projects")
            .map(ContentPayload::into_records)
            .unwrap_or_default()
    }

    #[test]
    fn test_array_becomes_many() {
        let out = records(json!([{"order": 1}, {"order": 2}, null, 7, {}]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].order(), 2.0);
    }

    #[test]
    fn test_object_becomes_single() {
        let payload = ContentPayload::from_json(json!({"title_tr": "A"}), "projects").unwrap();
        assert!(matches!(payload, ContentPayload::Single(_)));
    }

    #[test]
    fn test_sections_wrapper() {
        let out = records(json!({"sections": [{"title_tr": "A"}, {"title_tr": "B"}]}));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_collection_named_wrapper() {
        let out = records(json!({"projects": [{"order": 1}]}));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].order(), 1.0);
    }

    #[test]
    fn test_wrapper_key_with_siblings_is_a_record() {
        let out = records(json!({"sections": [1, 2], "title_tr": "A"}));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get("sections"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_unrelated_single_key_is_a_record() {
        let out = records(json!({"gallery": [{"src": "a.png"}]}));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_shapes() {
        assert!(ContentPayload::from_json(Value::Null, "projects").is_none());
        assert!(ContentPayload::from_json(json!({}), "projects").is_none());
        assert!(ContentPayload::from_json(json!("text"), "projects").is_none());
        assert!(records(json!([])).is_empty());
    }
}
