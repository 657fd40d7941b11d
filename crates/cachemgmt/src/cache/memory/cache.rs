//! In-memory cache implementation with TTL expiry and LRU eviction.
//!
//! Provides a thread-safe in-memory cache using tokio synchronization
//! primitives:
//! - Entries expire a fixed TTL after their last `set`; an expired entry is
//!   purged the first time `get` sees it.
//! - `max_entries` bounds memory; beyond it the least recently used entry is
//!   evicted.
//! - Keys matching `Person-*` are tracked so that the pattern deletion does
//!   not scan the whole store.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use cachemgmt_core::cache::{pattern_matches, Cache, Result, PERSON_KEY_PATTERN};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

#[derive(Debug)]
struct Store {
    entries: LruCache<String, CacheEntry>,
    /// Keys matching [`PERSON_KEY_PATTERN`].
    person_keys: HashSet<String>,
}

impl Store {
    fn remove(&mut self, key: &str) {
        self.entries.pop(key);
        self.person_keys.remove(key);
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<..>>` for concurrent access. The
/// entries and the person-key tracking share one lock, so a pattern delete
/// never races a concurrent `set` of a matching key.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<Store>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(Store {
                entries: LruCache::new(capacity),
                person_keys: HashSet::new(),
            })),
        }
    }

    /// Number of entries currently held, expired or not.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.entries.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: LRU bookkeeping mutates on every access.
        let mut store = self.store.write().await;

        match store.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        store.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        let entry = CacheEntry::new(value.to_vec(), ttl);

        if let Some((evicted, _)) = store.entries.push(key.to_string(), entry) {
            if evicted != key {
                store.person_keys.remove(&evicted);
            }
        }

        if pattern_matches(PERSON_KEY_PATTERN, key) {
            store.person_keys.insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.write().await;

        let keys_to_delete: Vec<String> = if pattern == PERSON_KEY_PATTERN {
            store.person_keys.iter().cloned().collect()
        } else {
            // Untracked pattern - fall back to full iteration
            store
                .entries
                .iter()
                .filter(|(key, _)| pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect()
        };

        for key in &keys_to_delete {
            store.remove(key);
        }

        tracing::trace!(
            pattern = %pattern,
            removed = keys_to_delete.len(),
            "Deleted cache keys by pattern"
        );
        Ok(())
    }
}
