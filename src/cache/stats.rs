//! Cache Statistics
//!
//! Lookup counters for the response cache.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the store on every lookup and sweep
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    swept: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub hits: u64,
    /// Lookups for keys that were never cached
    pub misses: u64,
    /// Entries discarded by a lookup that found them stale
    pub expired: u64,
    /// Entries discarded by purge passes
    pub swept: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swept(&self, count: u64) {
        self.swept.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Fraction of lookups served from the cache
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses + self.expired;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} expired={} swept={} | hit ratio {:.1}%",
            self.hits,
            self.misses,
            self.expired,
            self.swept,
            self.hit_ratio() * 100.0
        )
    }
}
