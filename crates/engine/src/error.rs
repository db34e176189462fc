//! Error types for request decoding and provider dispatch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A string POST body failed to parse as JSON. Providers recover from this
    /// locally and only log it.
    #[error("{provider} post data is not valid JSON: {source}")]
    MalformedPayload {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("provider already registered: {key}")]
    DuplicateProvider { key: String },
}
