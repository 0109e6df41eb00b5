//! Cache Store
//!
//! Mutex-guarded hashmap of response payloads stamped with their insertion time.

use bytes::Bytes;
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::stats::CacheStats;

/// Entry in the store with payload and insertion time
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Bytes,
    pub created_at: Instant,
}

impl CacheEntry {
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    /// An entry exactly `ttl` old is still fresh.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > ttl
    }
}

#[derive(Debug)]
struct Inner {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    stats: CacheStats,
}

/// Thread-safe store shared between callers and the sweeper.
///
/// Every read and write of the map goes through the single mutex, so the
/// age check and the removal of a stale entry happen in one critical section.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<Inner>,
}

impl CacheStore {
    /// Create a new empty store
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                ttl,
                stats: CacheStats::new(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    pub fn stats(&self) -> &CacheStats {
        &self.inner.stats
    }

    /// Insert or overwrite `key`, resetting its age to zero
    pub fn add(&self, key: impl Into<String>, payload: Bytes) {
        let entry = CacheEntry::new(payload);
        self.inner.entries.lock().insert(key.into(), entry);
    }

    /// Get payload by key; a stale entry is removed and reported as absent
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();
        let mut entries = self.inner.entries.lock();

        let lookup = entries
            .get(key)
            .map(|entry| (entry.is_expired(now, self.inner.ttl), entry.payload.clone()));

        match lookup {
            Some((false, payload)) => {
                self.inner.stats.record_hit();
                Some(payload)
            }
            Some((true, _)) => {
                entries.remove(key);
                self.inner.stats.record_expired();
                None
            }
            None => {
                self.inner.stats.record_miss();
                None
            }
        }
    }

    /// Number of stored entries, including stale ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every stale entry, returns count of removed entries
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let ttl = self.inner.ttl;
        let mut entries = self.inner.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, ttl));
        let removed = before - entries.len();
        drop(entries);

        self.inner.stats.record_swept(removed as u64);
        removed
    }
}
