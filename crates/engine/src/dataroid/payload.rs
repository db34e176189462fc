//! Extraction of display records from a Dataroid event batch.
//!
//! A collector request carries `{"events": [...]}`; only the first event is
//! surfaced. Every member is optional and a missing or `null` member is
//! skipped without error.

use serde_json::{Map, Value};
use tapwire_types::{FieldRecord, FieldRecords, render_value};

use super::labels::friendly_name;

pub(crate) const GROUP_GENERAL: &str = "general";
pub(crate) const GROUP_EVENT: &str = "event";
pub(crate) const GROUP_SESSION: &str = "session";
pub(crate) const GROUP_ATTRIBUTES: &str = "attributes";

const ATTRIBUTE_URL: &str = "url";
const ATTRIBUTE_CREATION_DATE: &str = "clientCreationDate";

/// Parse a raw JSON batch and extract the first event's records.
///
/// # Errors
/// Returns the JSON error when `text` is not a JSON document. A document of
/// the wrong shape is not an error and yields no records.
pub(crate) fn decode_event_batch(text: &str) -> Result<FieldRecords, serde_json::Error> {
    let document: Value = serde_json::from_str(text)?;
    let mut records = FieldRecords::new();
    if let Some(event) = first_event(&document) {
        push_event_records(&mut records, event);
    }
    Ok(records)
}

fn first_event(document: &Value) -> Option<&Map<String, Value>> {
    document.get("events")?.as_array()?.first()?.as_object()
}

fn push_event_records(records: &mut FieldRecords, event: &Map<String, Value>) {
    records.push_present("eventName", "Event Name", GROUP_EVENT, event.get("eventName"));
    records.push_present("eventId", "Event ID", GROUP_EVENT, event.get("eventId"));
    records.push_present("customerId", "Customer ID", GROUP_GENERAL, event.get("customerId"));

    if let Some(attributes) = event.get("attributes").and_then(Value::as_object) {
        push_attribute_records(records, attributes);
    }

    if let Some(session) = event.get("clientSession").and_then(Value::as_object) {
        records.push_present("sessionId", "Session ID", GROUP_SESSION, session.get("sessionId"));
        records.push_present("startDateTime", "Session Start Time", GROUP_SESSION, session.get("startDateTime"));
    }
}

/// Page URL and creation date lead; the rest follow in document order.
fn push_attribute_records(records: &mut FieldRecords, attributes: &Map<String, Value>) {
    records.push_present(ATTRIBUTE_URL, "Page URL", GROUP_ATTRIBUTES, attributes.get(ATTRIBUTE_URL));
    records.push_present(
        ATTRIBUTE_CREATION_DATE,
        "Client Creation Date",
        GROUP_ATTRIBUTES,
        attributes.get(ATTRIBUTE_CREATION_DATE),
    );

    for (key, value) in attributes {
        if key == ATTRIBUTE_URL || key == ATTRIBUTE_CREATION_DATE || value.is_null() {
            continue;
        }
        records.push(FieldRecord::new(key, friendly_name(key), render_value(value)).in_group(GROUP_ATTRIBUTES));
    }
}
