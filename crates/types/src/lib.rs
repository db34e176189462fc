use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod field;

pub use field::{FieldRecord, FieldRecords, render_value};

/// Category a provider belongs to.
///
/// Displayed as a title-cased label in the UI (e.g. "Analytics").
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum ProviderKind {
    #[default]
    Analytics,
}

impl ProviderKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable identity of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Unique short code (e.g. "DATAROID")
    pub key: String,
    /// Display name
    pub name: String,
    /// Category shown next to the name
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    /// Search aid for the UI
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A named display bucket. Providers declare these in render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub key: String,
    pub name: String,
}

impl FieldGroup {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Static metadata for a known raw parameter key.
///
/// Hidden descriptors exist for internal bookkeeping (column mapping) and
/// carry no label or group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl KeyDescriptor {
    pub fn labeled(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            group: Some(group.into()),
            hidden: false,
        }
    }

    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }
}

/// Insertion-ordered table of known raw keys.
pub type KeyTable = IndexMap<String, KeyDescriptor>;

/// Raw keys that populate the two summary columns of the request list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub account: String,
    pub request_type: String,
}

/// POST payload handed over by the host dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    /// Raw request body text, expected to be JSON.
    Raw(String),
    /// Pre-decoded form fields in submission order.
    Form(IndexMap<String, Value>),
}

impl PostBody {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(text) => text.is_empty(),
            Self::Form(fields) => fields.is_empty(),
        }
    }
}

impl From<&str> for PostBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

/// A decoded request: who recognized it and what it contained.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedRequest {
    pub provider: ProviderDescriptor,
    pub data: Vec<FieldRecord>,
}

impl ParsedRequest {
    /// Records a renderer should show, in output order.
    pub fn visible(&self) -> impl Iterator<Item = &FieldRecord> {
        self.data.iter().filter(|record| !record.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_displays_title_case() {
        assert_eq!(ProviderKind::Analytics.to_string(), "Analytics");
        assert_eq!(ProviderKind::default(), ProviderKind::Analytics);
    }

    #[test]
    fn hidden_key_descriptor_serializes_compactly() {
        let value = serde_json::to_value(KeyDescriptor::hidden()).expect("serialize");
        assert_eq!(value, serde_json::json!({ "hidden": true }));

        let value = serde_json::to_value(KeyDescriptor::labeled("Event Name", "event")).expect("serialize");
        assert_eq!(value, serde_json::json!({ "name": "Event Name", "group": "event" }));
    }

    #[test]
    fn empty_bodies_are_detected() {
        assert!(PostBody::from("").is_empty());
        assert!(PostBody::Form(IndexMap::new()).is_empty());
        assert!(!PostBody::from("{}").is_empty());
    }

    #[test]
    fn descriptor_serializes_kind_as_type() {
        let descriptor = ProviderDescriptor {
            key: "DATAROID".into(),
            name: "Dataroid".into(),
            kind: ProviderKind::Analytics,
            keywords: vec!["dataroid".into()],
        };
        let value = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(value["type"], "Analytics");
    }
}
