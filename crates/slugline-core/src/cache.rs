// Explicit memoization cache for provider responses.
//
// Entries live for the lifetime of the cache object and are never
// invalidated; callers own the cache and can inspect hit/miss counts.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Counters describing how a cache has been used so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// A thread-safe map from call arguments to a previously computed response.
pub struct MemoCache<K, V> {
    /// Label used in log lines (typically the memoized operation).
    name: &'static str,
    entries: Mutex<HashMap<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + std::fmt::Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<K, V>> {
        // Entries are plain values; a panic mid-insert cannot leave one half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`, counting the attempt as a hit or a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.entries().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, ?key, "cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, ?key, "cache miss");
        }
        found
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) {
        self.entries().insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
