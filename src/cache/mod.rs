//! Cache Module
//!
//! Content-addressed, per-backend caching of title suggestions with a fixed
//! TTL, in front of an injectable key-value store.

mod entry;
mod key;
mod service;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{get_cache_key, KEY_NAMESPACE};
pub use service::{TitleSuggestionCache, DEFAULT_CACHE_TTL};
pub use stats::CacheStats;
pub use store::{MemoryStore, SuggestionStore};

#[cfg(test)]
pub(crate) use service::tests::{BrokenStore, ReadOnlyStore};
