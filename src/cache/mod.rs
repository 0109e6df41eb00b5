//! Response Cache
//!
//! In-memory, time-bounded cache of HTTP response bodies keyed by URL.

mod stats;
mod store;
mod sweeper;
mod ttl_cache;

pub use stats::{CacheStats, StatsSnapshot};
pub use store::{CacheEntry, CacheStore};
pub use sweeper::Sweeper;
pub use ttl_cache::{CacheError, TtlCache, MAX_TTL};
