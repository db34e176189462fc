//! # Tapwire Engine
//!
//! Recognizes captured analytics-collector requests and decodes them into an
//! ordered list of labeled, grouped field records.
//!
//! ## Usage
//!
//! ```rust
//! use tapwire_engine::ProviderRegistry;
//! use tapwire_types::PostBody;
//!
//! let registry = ProviderRegistry::with_builtin_providers();
//! let body = PostBody::from(r#"{"events":[{"eventName":"page_view"}]}"#);
//! let parsed = registry
//!     .parse("https://api.dataroid.com/collector/collect/event", Some(&body))?
//!     .expect("dataroid recognizes its collector");
//!
//! assert_eq!(parsed.provider.key, "DATAROID");
//! assert_eq!(parsed.data[0].field, "Event Name");
//! assert_eq!(parsed.data[0].value, "page_view");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`provider`**: the `Provider` trait, the dispatching `ProviderRegistry`
//!   and the generic query/form parameter passes
//! - **`dataroid`**: the Dataroid collector provider
//! - **`error`**: error types shared by providers and the registry

pub mod dataroid;
pub mod error;
pub mod provider;

pub use dataroid::{DataroidProvider, friendly_name};
pub use error::ProviderError;
pub use provider::{Provider, ProviderRegistry};
