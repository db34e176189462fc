use std::{fmt, sync::Arc};

use tapwire_types::{ParsedRequest, PostBody};
use tracing::debug;
use url::Url;

use super::Provider;
use crate::{DataroidProvider, ProviderError};

/// Ordered set of providers that routes a captured request to the first
/// provider whose URL pattern accepts it.
///
/// Providers are immutable once registered, so a registry can be shared
/// across threads behind an `Arc` without locking.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.providers.iter().map(|provider| provider.descriptor().key.as_str()).collect();
        f.debug_struct("ProviderRegistry").field("providers", &keys).finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every provider shipped in this crate.
    pub fn with_builtin_providers() -> Self {
        Self {
            providers: vec![Arc::new(DataroidProvider::new())],
        }
    }

    /// Register a provider. Keys are unique; dispatch follows registration order.
    pub fn register<P: Provider + 'static>(&mut self, provider: P) -> Result<(), ProviderError> {
        let key = &provider.descriptor().key;
        if self.find_by_key(key).is_some() {
            return Err(ProviderError::DuplicateProvider { key: key.clone() });
        }
        self.providers.push(Arc::new(provider));
        Ok(())
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|provider| provider.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First provider whose pattern matches the raw URL.
    pub fn find(&self, url: &str) -> Option<&dyn Provider> {
        self.providers().find(|provider| provider.matches(url))
    }

    /// Provider with the given key, ignoring ASCII case.
    pub fn find_by_key(&self, key: &str) -> Option<&dyn Provider> {
        self.providers()
            .find(|provider| provider.descriptor().key.eq_ignore_ascii_case(key))
    }

    /// Decode a captured request with the first matching provider.
    ///
    /// # Returns
    /// `Ok(None)` when no provider recognizes the URL.
    ///
    /// # Errors
    /// [`ProviderError::InvalidUrl`] when a provider matched but the URL
    /// cannot be parsed into host/path/query components.
    pub fn parse(&self, url: &str, body: Option<&PostBody>) -> Result<Option<ParsedRequest>, ProviderError> {
        let Some(provider) = self.find(url) else {
            debug!(url = %url, "no provider matched request");
            return Ok(None);
        };

        let parsed_url = Url::parse(url).map_err(|source| ProviderError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let parsed = provider.parse_request(&parsed_url, body);
        debug!(
            provider = %parsed.provider.key,
            record_count = parsed.data.len(),
            "decoded request"
        );
        Ok(Some(parsed))
    }
}
