//! Time-bounded cache for read-only configuration lookups.
//!
//! Event types, routing rules, and rate-limit policies change rarely and
//! may be cached with a short TTL without correctness risk. [`TtlCache`] is
//! an explicit object — the owner injects the TTL at construction and tests
//! inject a fresh instance per case — rather than a process-wide singleton.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A mutex-guarded map whose entries expire `ttl` after insertion.
///
/// Values are cloned out on read, so `V` is expected to be cheap to clone
/// (small config structs, `Arc`-wrapped data).
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    /// Create an empty cache whose entries live for `ttl` after insertion.
    ///
    /// A zero TTL disables caching entirely: every `get` misses.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a key, returning `None` if absent or expired.
    ///
    /// Expired entries are removed on access.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace a value, resetting its expiry clock.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop a single entry immediately.
    ///
    /// Invalidation hook for callers that mutate the underlying
    /// configuration and need the next read to hit the store.
    pub fn invalidate(&self, key: &K) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Drop every entry immediately.
    pub fn invalidate_all(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Remove all expired entries, returning how many were dropped.
    ///
    /// Expired entries are otherwise only reclaimed lazily on `get`, so a
    /// long-lived cache with a churning key set can call this periodically.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of entries currently stored, including not-yet-purged expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True when the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
