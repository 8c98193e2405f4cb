//! Title Suggestion Cache
//!
//! Fail-open cache in front of the generation backends. Lookups degrade to a
//! miss and writes degrade to `false` whenever the store misbehaves, so a
//! broken cache only costs extra backend calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cache::{get_cache_key, SuggestionStore};

/// Default lifetime of a cached suggestion list (24 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Per-backend suggestion cache backed by an injected store.
#[derive(Clone)]
pub struct TitleSuggestionCache {
    store: Arc<dyn SuggestionStore>,
    ttl: Duration,
}

impl TitleSuggestionCache {
    /// Creates a cache writing through `store` with the default 24h TTL.
    pub fn new(store: Arc<dyn SuggestionStore>) -> Self {
        Self::with_ttl(store, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn SuggestionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Lookup ==
    /// Returns the cached suggestions for `content` from `backend_name`.
    ///
    /// Never fails: missing inputs, misses, empty stored lists and store
    /// errors all yield `None`.
    pub async fn get_cached_suggestions(
        &self,
        content: &str,
        backend_name: &str,
    ) -> Option<Vec<String>> {
        if content.is_empty() || backend_name.is_empty() {
            warn!("Missing required parameters for cache lookup");
            return None;
        }

        let key = match get_cache_key(content, backend_name) {
            Ok(key) => key,
            Err(e) => {
                error!("Error retrieving cached suggestions: {}", e);
                return None;
            }
        };

        match self.store.get(&key).await {
            Ok(Some(suggestions)) if !suggestions.is_empty() => {
                info!("Cache hit for {} title suggestions", backend_name);
                Some(suggestions)
            }
            Ok(_) => {
                info!("Cache miss for {} title suggestions", backend_name);
                None
            }
            Err(e) => {
                error!(
                    store = self.store.name(),
                    "Error retrieving cached suggestions: {}", e
                );
                None
            }
        }
    }

    // == Store ==
    /// Caches `suggestions` for `content` from `backend_name`.
    ///
    /// Returns `false` without touching the store when any input is empty,
    /// and `false` when the store rejects the write.
    pub async fn cache_suggestions(
        &self,
        content: &str,
        backend_name: &str,
        suggestions: &[String],
    ) -> bool {
        if suggestions.is_empty() {
            warn!("No suggestions provided for caching");
            return false;
        }
        if content.is_empty() || backend_name.is_empty() {
            warn!("Missing required parameters for caching");
            return false;
        }

        let key = match get_cache_key(content, backend_name) {
            Ok(key) => key,
            Err(e) => {
                error!("Error caching title suggestions: {}", e);
                return false;
            }
        };

        match self.store.set(&key, suggestions.to_vec(), self.ttl).await {
            Ok(()) => {
                info!(
                    "Cached {} title suggestions for {}",
                    suggestions.len(),
                    backend_name
                );
                true
            }
            Err(e) => {
                error!(store = self.store.name(), "Cache operation failed: {}", e);
                false
            }
        }
    }
}
