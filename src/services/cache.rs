//! Small TTL cache wrapping the common `(deadline, value)` HashMap-behind-a-lock
//! pattern. The command gate uses one as a fast-path mirror of cooldown state;
//! the shared lock store stays authoritative, so entries here may only ever
//! *shorten* a round-trip, never grant anything the store would refuse.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub struct TtlCache<K, V> {
    map: RwLock<HashMap<K, (Instant, V)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a cloned value if present and unexpired. Expired entries are
    /// removed on the way out so the map does not grow unbounded.
    pub async fn get(&self, key: &K) -> Option<V> {
        // Fast path: read lock only.
        if let Some((deadline, value)) = self.map.read().await.get(key).cloned() {
            if Instant::now() < deadline {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(value);
            }
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }
        // Entry expired: take the write lock to evict, re-checking under it.
        let mut write = self.map.write().await;
        if let Some((deadline, _)) = write.get(key) {
            if Instant::now() >= *deadline {
                write.remove(key);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert a value that expires `ttl` from now.
    pub async fn insert(&self, key: K, value: V, ttl: Duration) {
        self.map
            .write()
            .await
            .insert(key, (Instant::now() + ttl, value));
    }

    pub async fn remove(&self, key: &K) {
        self.map.write().await.remove(key);
    }

    /// (hits, misses) counters for diagnostics.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
