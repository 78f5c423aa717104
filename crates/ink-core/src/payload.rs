//! Create/update request payload extraction.
//!
//! Request bodies have the shape
//! `{"data": {"<field>": {"content": "<value>"}, ...}}`. Each field maps to
//! its `content` string; a missing, null, non-string, or empty `content`
//! maps to the empty string.

use serde_json::Value;

use crate::entities::ContentItem;

/// Field assignments extracted from a request payload, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPayload {
    fields: Vec<(String, String)>,
}

impl FieldPayload {
    /// Parse a payload, or `None` if it is empty, not an object, or lacks a
    /// `data` object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let root = value.as_object().filter(|map| !map.is_empty())?;
        let data = root.get("data")?.as_object()?;
        let fields = data
            .iter()
            .map(|(name, entry)| (name.clone(), content_of(entry).to_string()))
            .collect();
        Some(Self { fields })
    }

    /// Like [`FieldPayload::from_value`], but a malformed payload yields no
    /// assignments instead of `None`.
    #[must_use]
    pub fn from_value_lenient(value: &Value) -> Self {
        Self::from_value(value).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply every assignment to `item`.
    pub fn apply_to(&self, item: &mut ContentItem) {
        for (field, value) in self.iter() {
            item.set(field, value);
        }
    }
}

fn content_of(entry: &Value) -> &str {
    entry
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ContentKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn extracts_content_values() {
        let payload = FieldPayload::from_value(&json!({
            "data": {
                "title": {"content": "T"},
                "body": {"content": "B"}
            }
        }))
        .unwrap();

        let fields: Vec<_> = payload.iter().collect();
        assert_eq!(fields, vec![("body", "B"), ("title", "T")]);
    }

    #[rstest]
    #[case(json!({"content": ""}))]
    #[case(json!({"content": null}))]
    #[case(json!({"content": 42}))]
    #[case(json!({}))]
    #[case(json!("plain"))]
    fn missing_or_odd_content_maps_to_empty(#[case] entry: Value) {
        let payload = FieldPayload::from_value(&json!({"data": {"title": entry}})).unwrap();
        assert_eq!(payload.iter().next(), Some(("title", "")));
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(json!({}))]
    #[case(json!([]))]
    #[case(json!("data"))]
    #[case(json!({"title": {"content": "no data wrapper"}}))]
    #[case(json!({"data": ["not", "a", "map"]}))]
    fn malformed_payloads_are_rejected(#[case] value: Value) {
        assert!(FieldPayload::from_value(&value).is_none());
        assert!(FieldPayload::from_value_lenient(&value).is_empty());
    }

    #[test]
    fn apply_sets_fields_on_item() {
        let payload = FieldPayload::from_value(&json!({
            "data": {"title": {"content": "New"}, "field_summary": {"content": "S"}}
        }))
        .unwrap();
        let mut item = ContentItem::new(ContentKind::Article);
        payload.apply_to(&mut item);

        assert_eq!(item.title(), "New");
        assert_eq!(item.get("field_summary"), Some("S"));
    }
}
