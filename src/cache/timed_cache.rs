//! Time-based cache with TTL (Time To Live) support.
//!
//! Loaded index snapshots are large and immutable, so entries are held as
//! `Arc<V>` and handed out without copying.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A cache entry with the time it was stored.
#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    inserted_at: Instant,
}

/// A thread-safe cache with time-based expiration.
///
/// Entries older than the TTL are treated as absent by every read. The cache
/// is cheap to clone; clones share storage.
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> Clone for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new TimedCache with the specified TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_seconds))
    }

    /// Create a new TimedCache with an arbitrary TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store a value, replacing any previous entry for the key.
    ///
    /// Returns the shared handle that was stored.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            value: Arc::clone(&value),
            inserted_at: Instant::now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, entry);
        }
        value
    }

    /// Get a value if it exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.get_with_age(key).map(|(value, _)| value)
    }

    /// Get a value together with how long ago it was stored.
    pub fn get_with_age(&self, key: &K) -> Option<(Arc<V>, Duration)> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        let age = entry.inserted_at.elapsed();
        if age < self.ttl {
            Some((Arc::clone(&entry.value), age))
        } else {
            None
        }
    }

    /// Check if a key exists and hasn't expired.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_with_age(key).is_some()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Drop every expired entry.
    pub fn cleanup_expired(&self) {
        let ttl = self.ttl;
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}
