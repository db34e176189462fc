//! Decoded field records and the ordered builder used to assemble them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded, labeled datum extracted from a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Raw machine key the value was read from
    pub key: String,
    /// Display-ready value
    pub value: String,
    /// Display label
    pub field: String,
    /// Group key; `None` falls into the host's default bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Internal bookkeeping record that is never rendered
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl FieldRecord {
    pub fn new(key: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            field: field.into(),
            group: None,
            hidden: false,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            field: key.clone(),
            key,
            value: value.into(),
            group: None,
            hidden: true,
        }
    }
}

/// Ordered-append builder for a request's field records.
///
/// Insertion order is the render order within a group, so callers push in
/// extraction order and never sort.
#[derive(Debug, Clone, Default)]
pub struct FieldRecords {
    records: Vec<FieldRecord>,
}

impl FieldRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FieldRecord) {
        self.records.push(record);
    }

    /// Append a grouped record when `value` is present and not JSON `null`.
    pub fn push_present(&mut self, key: &str, field: &str, group: &str, value: Option<&Value>) {
        if let Some(value) = value.filter(|value| !value.is_null()) {
            self.push(FieldRecord::new(key, field, render_value(value)).in_group(group));
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = FieldRecord>) {
        self.records.extend(records);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldRecord> {
        self.records
    }
}

/// Render a JSON value the way it should appear in a value column.
///
/// Strings are shown verbatim (no quotes); scalars use their JSON text;
/// arrays and objects are shown as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_value_unquotes_strings() {
        assert_eq!(render_value(&json!("page_view")), "page_view");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!({"b": 1, "a": [1, 2]})), r#"{"b":1,"a":[1,2]}"#);
    }

    #[test]
    fn push_present_skips_null_and_missing() {
        let mut records = FieldRecords::new();
        records.push_present("eventName", "Event Name", "event", None);
        records.push_present("eventName", "Event Name", "event", Some(&Value::Null));
        assert!(records.is_empty());

        records.push_present("eventName", "Event Name", "event", Some(&json!("")));
        let records = records.into_vec();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "");
        assert_eq!(records[0].group.as_deref(), Some("event"));
    }

    #[test]
    fn hidden_record_skips_presentation_fields_in_json() {
        let record = FieldRecord::hidden("requestType", "Event Collection");
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["hidden"], true);
        assert!(value.get("group").is_none());

        let shown = serde_json::to_value(FieldRecord::new("k", "K", "v")).expect("serialize");
        assert!(shown.get("hidden").is_none());
    }
}
