//! Provider contract and dispatch.
//!
//! Modules:
//! - `params`: form-data pass shared by all providers
//! - `registry`: ordered provider registry that routes URLs to a provider

mod params;
mod registry;

pub use params::form_records;
pub use registry::ProviderRegistry;

use regex::Regex;
use tapwire_types::{ColumnMapping, FieldGroup, FieldRecord, FieldRecords, KeyTable, ParsedRequest, PostBody, ProviderDescriptor};
use url::Url;

/// A pluggable definition that recognizes one vendor's traffic and decodes it.
///
/// Implementors supply identity, static tables, and the two vendor-specific
/// passes (`decode_body`, `custom_records`). The provided `decode` chains
/// the body pass and the computed pass in that order. The URL contributes
/// only through `custom_records`; query parameters are never decoded.
pub trait Provider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Pattern a full request URL must satisfy for this provider to apply.
    fn url_pattern(&self) -> &Regex;

    /// Raw keys behind the request list's summary columns.
    fn column_mapping(&self) -> ColumnMapping;

    /// Display groups in render order.
    fn groups(&self) -> &[FieldGroup];

    /// Known raw parameter vocabulary, published for the host's UI chrome.
    fn keys(&self) -> &KeyTable;

    /// Decode a non-empty POST body into records. Must not fail: malformed
    /// input yields an empty list.
    fn decode_body(&self, body: &PostBody) -> Vec<FieldRecord>;

    /// Computed and static records appended after everything else.
    fn custom_records(&self, url: &Url) -> Vec<FieldRecord>;

    fn matches(&self, url: &str) -> bool {
        self.url_pattern().is_match(url)
    }

    fn decode(&self, url: &Url, body: Option<&PostBody>) -> Vec<FieldRecord> {
        let mut records = FieldRecords::new();
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            records.extend(self.decode_body(body));
        }
        records.extend(self.custom_records(url));
        records.into_vec()
    }

    fn parse_request(&self, url: &Url, body: Option<&PostBody>) -> ParsedRequest {
        ParsedRequest {
            provider: self.descriptor().clone(),
            data: self.decode(url, body),
        }
    }
}
