//! Cache Sweeper
//!
//! Background task that periodically removes stale entries.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{CacheStore, MAX_TTL};

/// Background sweep task for CacheStore
pub struct Sweeper {
    store: CacheStore,
    period: Duration,
    first_sweep: Instant,
}

impl Sweeper {
    /// Create a new sweeper whose first pass is one full period from now
    pub fn new(store: CacheStore, period: Duration) -> Self {
        // Keeps every tick deadline representable as an Instant
        let period = period.min(MAX_TTL);
        let first_sweep = Instant::now() + period;
        Self {
            store,
            period,
            first_sweep,
        }
    }

    /// Run the sweeper until `cancel` fires (should be spawned as a task)
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval_at(self.first_sweep, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period = ?self.period, "Cache sweeper started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = self.store.purge_expired();
                    if removed > 0 {
                        debug!(removed = removed, "Swept expired entries");
                    }
                }
            }
        }

        info!("Cache sweeper stopped");
    }

    /// Spawn the sweeper on `handle`
    pub fn spawn(
        handle: &Handle,
        store: CacheStore,
        period: Duration,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let sweeper = Self::new(store, period);
        handle.spawn(sweeper.run(cancel))
    }
}
