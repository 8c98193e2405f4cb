//! Cache Store Module
//!
//! The key-value boundary the cache service writes through, plus the
//! in-memory implementation used by the server.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::cache::{CacheEntry, CacheStats};
use crate::error::StoreError;

// == Store Trait ==
/// Key-value store holding suggestion lists with a per-write TTL.
///
/// Implementations synchronise internally and may fail on infrastructure
/// problems; callers decide how to treat those failures.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;

    /// Writes `suggestions` under `key`, replacing any previous value.
    async fn set(&self, key: &str, suggestions: Vec<String>, ttl: Duration)
        -> Result<(), StoreError>;

    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;
}

// == Memory Store ==
/// Bounded in-memory store with lazy and periodic expiry.
///
/// Lock order is always `entries` before `stats`.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    stats: Mutex<CacheStats>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` lists.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: Mutex::new(CacheStats::default()),
            max_entries,
        }
    }

    // == Stats ==
    /// Returns current store statistics.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut stats = self.stats.lock().await.clone();
        stats.set_total_entries(entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = purge_expired(&mut entries);
        self.stats.lock().await.record_expirations(removed);
        removed
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // Drops expired entries first, then the entry closest to expiry.
    fn make_room(
        &self,
        entries: &mut HashMap<String, CacheEntry>,
        stats: &mut CacheStats,
    ) -> Result<(), StoreError> {
        let removed = purge_expired(entries);
        stats.record_expirations(removed);

        while entries.len() >= self.max_entries {
            let victim = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone());

            match victim {
                Some(key) => {
                    entries.remove(&key);
                    stats.record_eviction();
                }
                None => {
                    return Err(StoreError::Full(format!(
                        "capacity of {} entries leaves no room",
                        self.max_entries
                    )))
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SuggestionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        // Hits and plain misses only need the read lock
        let cached = live_suggestions(&*self.entries.read().await, key);
        match cached {
            Some(Some(suggestions)) => {
                self.stats.lock().await.record_hit();
                return Ok(Some(suggestions));
            }
            None => {
                self.stats.lock().await.record_miss();
                return Ok(None);
            }
            Some(None) => {}
        }

        // Expired: the entry may have been rewritten before the write lock was taken
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.lock().await;
        match live_suggestions(&entries, key) {
            Some(Some(suggestions)) => {
                stats.record_hit();
                return Ok(Some(suggestions));
            }
            Some(None) => {
                entries.remove(key);
                stats.record_expirations(1);
            }
            None => {}
        }
        stats.record_miss();
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        suggestions: Vec<String>,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.lock().await;

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            self.make_room(&mut entries, &mut stats)?;
        }

        entries.insert(key.to_string(), CacheEntry::new(suggestions, ttl));
        stats.record_write();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// `None` when absent, `Some(None)` when present but expired.
fn live_suggestions(
    entries: &HashMap<String, CacheEntry>,
    key: &str,
) -> Option<Option<Vec<String>>> {
    entries
        .get(key)
        .map(|entry| (!entry.is_expired()).then(|| entry.suggestions.clone()))
}

fn purge_expired(entries: &mut HashMap<String, CacheEntry>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired());
    before - entries.len()
}
