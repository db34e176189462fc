//! Dataroid analytics collector (<https://dataroid.com/>).
//!
//! Requests to the event collector carry a JSON batch in the POST body; the
//! URL itself only identifies the endpoint.

mod labels;
mod payload;

pub use labels::friendly_name;

use once_cell::sync::Lazy;
use regex::Regex;
use tapwire_types::{
    ColumnMapping, FieldGroup, FieldRecord, KeyDescriptor, KeyTable, PostBody, ProviderDescriptor, ProviderKind,
};
use tracing::warn;
use url::Url;

use crate::ProviderError;
use crate::provider::{Provider, form_records};
use payload::{GROUP_ATTRIBUTES, GROUP_EVENT, GROUP_GENERAL, GROUP_SESSION, decode_event_batch};

/// The collector host must follow the `//` authority marker or a subdomain dot
/// (so `other-dataroid.com`, `notapi.dataroid.com` and host-less `file:///`
/// paths fail) and be followed by an optional port and a path that reaches
/// `collector/collect/event`.
static COLLECTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|//|\.)api\.dataroid\.com(?::\d+)?/(?:.*/)?collector/collect/event")
        .expect("collector pattern compiles")
});

pub const PROVIDER_KEY: &str = "DATAROID";
pub const HOSTNAME_KEY: &str = "request_hostname";
pub const REQUEST_TYPE_KEY: &str = "requestType";
pub const REQUEST_TYPE_VALUE: &str = "Event Collection";

#[derive(Debug, Clone)]
pub struct DataroidProvider {
    descriptor: ProviderDescriptor,
    groups: Vec<FieldGroup>,
    keys: KeyTable,
}

impl Default for DataroidProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataroidProvider {
    pub fn new() -> Self {
        Self {
            descriptor: ProviderDescriptor {
                key: PROVIDER_KEY.to_string(),
                name: "Dataroid".to_string(),
                kind: ProviderKind::Analytics,
                keywords: vec!["dataroid".into(), "analytics".into(), "collector".into()],
            },
            groups: vec![
                FieldGroup::new(GROUP_GENERAL, "General"),
                FieldGroup::new(GROUP_EVENT, "Event Data"),
                FieldGroup::new(GROUP_SESSION, "Session Data"),
                FieldGroup::new(GROUP_ATTRIBUTES, "Attributes"),
            ],
            keys: key_table(),
        }
    }

    /// Decode a POST body, surfacing malformed JSON instead of swallowing it.
    ///
    /// # Errors
    /// [`ProviderError::MalformedPayload`] when a raw body is not JSON.
    pub fn try_decode_body(&self, body: &PostBody) -> Result<Vec<FieldRecord>, ProviderError> {
        match body {
            PostBody::Raw(text) if text.is_empty() => Ok(Vec::new()),
            PostBody::Raw(text) => decode_event_batch(text)
                .map(|records| records.into_vec())
                .map_err(|source| ProviderError::MalformedPayload {
                    provider: self.descriptor.name.clone(),
                    source,
                }),
            PostBody::Form(fields) => Ok(form_records(fields)),
        }
    }
}

fn key_table() -> KeyTable {
    let mut keys = KeyTable::new();
    keys.insert("eventName".into(), KeyDescriptor::labeled("Event Name", GROUP_EVENT));
    keys.insert("eventId".into(), KeyDescriptor::labeled("Event ID", GROUP_EVENT));
    keys.insert("url".into(), KeyDescriptor::labeled("URL", GROUP_ATTRIBUTES));
    keys.insert(
        "clientCreationDate".into(),
        KeyDescriptor::labeled("Client Creation Date", GROUP_ATTRIBUTES),
    );
    keys.insert("sessionId".into(), KeyDescriptor::labeled("Session ID", GROUP_SESSION));
    keys.insert(
        "startDateTime".into(),
        KeyDescriptor::labeled("Session Start Date/Time", GROUP_SESSION),
    );
    keys.insert("customerId".into(), KeyDescriptor::labeled("Customer ID", GROUP_GENERAL));
    keys.insert(REQUEST_TYPE_KEY.into(), KeyDescriptor::hidden());
    keys
}

impl Provider for DataroidProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn url_pattern(&self) -> &Regex {
        &COLLECTOR_PATTERN
    }

    fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping {
            account: "eventName".to_string(),
            request_type: REQUEST_TYPE_KEY.to_string(),
        }
    }

    fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    fn keys(&self) -> &KeyTable {
        &self.keys
    }

    fn decode_body(&self, body: &PostBody) -> Vec<FieldRecord> {
        self.try_decode_body(body).unwrap_or_else(|error| {
            warn!(provider = %self.descriptor.key, error = %error, "discarding undecodable post data");
            Vec::new()
        })
    }

    fn custom_records(&self, url: &Url) -> Vec<FieldRecord> {
        vec![
            FieldRecord::new(HOSTNAME_KEY, "Dataroid Host", url.host_str().unwrap_or_default()).in_group(GROUP_GENERAL),
            FieldRecord::hidden(REQUEST_TYPE_KEY, REQUEST_TYPE_VALUE),
        ]
    }
}
