//! Pre-decoded form data pass shared by all providers.

use indexmap::IndexMap;
use serde_json::Value;
use tapwire_types::{FieldRecord, render_value};

/// One record per form entry, labeled with its raw key and left ungrouped.
pub fn form_records(fields: &IndexMap<String, Value>) -> Vec<FieldRecord> {
    fields
        .iter()
        .map(|(key, value)| FieldRecord::new(key, key, render_value(value)))
        .collect()
}
