//! TTL Cache
//!
//! Owns a [`CacheStore`] together with the sweeper task that reclaims it.

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::{CacheStore, StatsSnapshot, Sweeper};

/// Longest accepted TTL (100 years); larger values overflow timer deadlines
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Errors raised while constructing a cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// A zero TTL would expire every entry on insertion
    #[error("cache TTL must be greater than zero")]
    InvalidTtl,

    #[error("cache TTL must not exceed {max:?}")]
    TtlTooLarge { max: Duration },

    /// The sweeper needs a tokio runtime to run on
    #[error("cache must be created inside a tokio runtime")]
    NoRuntime,
}

/// Time-bounded response cache.
///
/// Entries older than the TTL are never returned. They are dropped lazily by
/// [`TtlCache::get`] and in bulk by a background sweep that runs once per
/// TTL. The sweep stops on [`TtlCache::shutdown`] or when the cache is dropped.
#[derive(Debug)]
pub struct TtlCache {
    store: CacheStore,
    cancel: CancellationToken,
    sweeper: Option<JoinHandle<()>>,
}

impl TtlCache {
    /// Create an empty cache and start its sweeper on the current runtime
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        Self::with_handle(ttl, &handle)
    }

    /// Create an empty cache whose sweeper runs on `handle`
    pub fn with_handle(ttl: Duration, handle: &Handle) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }
        if ttl > MAX_TTL {
            return Err(CacheError::TtlTooLarge { max: MAX_TTL });
        }

        let store = CacheStore::new(ttl);
        let cancel = CancellationToken::new();
        let sweeper = Sweeper::spawn(handle, store.clone(), ttl, cancel.clone());

        Ok(Self {
            store,
            cancel,
            sweeper: Some(sweeper),
        })
    }

    #[inline]
    pub fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        self.store.add(key, payload.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.store.get(key)
    }

    pub fn ttl(&self) -> Duration {
        self.store.ttl()
    }

    /// Stored entries, including stale ones the sweeper has not reached yet
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Run a sweep pass now, returns count of removed entries
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.store.stats().snapshot()
    }

    pub fn is_sweeper_running(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|h| !h.is_finished())
    }

    #[cfg(test)]
    fn take_sweeper(&mut self) -> Option<JoinHandle<()>> {
        self.sweeper.take()
    }

    /// Stop the sweeper and wait for it to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.sweeper.take() {
            if let Err(e) = handle.await {
                warn!("Cache sweeper ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_add_get() {
        let cases = [
            ("https://pokeapi.co/api/v2/pokemon/1", "bulbasaur"),
            ("https://pokeapi.co/api/v2/pokemon/25", "pikachu"),
        ];

        for (key, val) in cases {
            let cache = TtlCache::new(Duration::from_secs(5)).unwrap();
            cache.add(key, val.as_bytes().to_vec());

            assert_eq!(cache.get(key).as_deref(), Some(val.as_bytes()));
        }
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let cache = TtlCache::new(Duration::from_secs(5)).unwrap();
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_expiration() {
        let cache = TtlCache::new(Duration::from_millis(10)).unwrap();
        let key = "https://pokeapi.co/api/v2/pokemon/150";

        cache.add(key, Bytes::from_static(b"mewtwo"));
        assert_eq!(cache.get(key), Some(Bytes::from_static(b"mewtwo")));

        tokio::time::sleep(Duration::from_millis(15)).await;
        assert!(cache.get(key).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_up_to_exactly_ttl() {
        let ttl = Duration::from_secs(5);
        let cache = TtlCache::new(ttl).unwrap();
        cache.add("a", Bytes::from_static(b"bulbasaur"));

        tokio::time::advance(ttl).await;
        assert_eq!(cache.get("a"), Some(Bytes::from_static(b"bulbasaur")));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(cache.get("a").is_none());
        assert_eq!(cache.stats().expired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readd_resets_age() {
        let ttl = Duration::from_secs(5);
        let cache = TtlCache::new(ttl).unwrap();

        cache.add("k", Bytes::from_static(b"p1"));
        tokio::time::advance(Duration::from_secs(3)).await;
        cache.add("k", Bytes::from_static(b"p2"));

        // Past the first insertion's expiry, inside the second's
        tokio::time::advance(ttl - Duration::from_millis(1)).await;
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"p2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_reclaims_unread_entries() {
        let ttl = Duration::from_secs(1);
        let cache = TtlCache::new(ttl).unwrap();
        cache.add("write-once", Bytes::from_static(b"ditto"));

        tokio::time::sleep(ttl * 2 + Duration::from_millis(1)).await;

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().swept, 1);

        // No stale state leaks into a fresh insert
        cache.add("write-once", Bytes::from_static(b"ditto2"));
        assert_eq!(cache.get("write-once"), Some(Bytes::from_static(b"ditto2")));
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let err = TtlCache::new(Duration::ZERO).unwrap_err();
        assert!(matches!(err, CacheError::InvalidTtl));
    }

    #[tokio::test]
    async fn test_oversized_ttl_rejected() {
        let err = TtlCache::new(Duration::from_secs(u64::MAX)).unwrap_err();
        assert!(matches!(err, CacheError::TtlTooLarge { .. }));
        assert!(err.to_string().contains("TTL"));
    }

    #[tokio::test]
    async fn test_max_ttl_keeps_sweeper_alive() {
        let cache = TtlCache::new(MAX_TTL).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(cache.is_sweeper_running());

        cache.add("a", Bytes::from_static(b"bulbasaur"));
        assert!(cache.get("a").is_some());
    }

    #[tokio::test]
    async fn test_drop_stops_sweeper() {
        let mut cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        let cancel = cache.cancel.clone();
        let sweeper = cache.take_sweeper().unwrap();
        assert!(!sweeper.is_finished());

        drop(cache);

        assert!(cancel.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), sweeper)
            .await
            .expect("sweeper should stop once the cache is dropped")
            .unwrap();
    }

    #[test]
    fn test_requires_runtime() {
        let err = TtlCache::new(Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, CacheError::NoRuntime));
    }

    #[tokio::test]
    async fn test_shutdown_stops_sweeper() {
        let cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        assert!(cache.is_sweeper_running());

        tokio::time::timeout(Duration::from_secs(1), cache.shutdown())
            .await
            .expect("shutdown should complete");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)).unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..100 {
                        let key = format!("pokemon/{}/{}", i, j);
                        cache.add(key.clone(), format!("payload-{}-{}", i, j).into_bytes());
                        assert!(cache.get(&key).is_some());

                        // Overlapping key set
                        cache.add(format!("location/{}", j % 10), vec![i as u8]);
                        assert!(cache.get(&format!("location/{}", j % 10)).is_some());
                    }
                })
            })
            .collect();

        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(cache.len(), 16 * 100 + 10);
    }
}
