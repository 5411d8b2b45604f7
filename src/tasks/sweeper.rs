//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from an
//! [`ExpiringStore`], so entries nobody reads are still reclaimed.
//!
//! The task is owned by the cache that spawned it. Shutdown is a handshake:
//! [`Sweeper::stop`] flips a watch channel and then waits for the task to
//! exit, so no sweep is running once it returns.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::ExpiringStore;
use crate::error::{CacheError, Result};

// == Sweeper Handle ==
/// Handle to a running sweeper task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    // == Spawn ==
    /// Spawns the sweeper on the current tokio runtime.
    ///
    /// The first pass runs one full `period` after spawning. Fails if called
    /// outside a runtime.
    pub fn spawn(store: Arc<ExpiringStore>, period: Duration) -> Result<Self> {
        // tokio intervals reject a zero period
        let period = period.max(Duration::from_millis(1));
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CacheError::Runtime(e.to_string()))?;

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = runtime.spawn(run(store, period, shutdown_rx));

        Ok(Self { shutdown, handle })
    }

    // == Stop ==
    /// Signals the task to stop and waits until it has exited.
    pub async fn stop(mut self) -> Result<()> {
        // The receiver only disappears if the task already finished.
        let _ = self.shutdown.send(true);
        (&mut self.handle)
            .await
            .map_err(|e| CacheError::Sweeper(e.to_string()))
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

// == Sweep Loop ==
async fn run(store: Arc<ExpiringStore>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    ticker.tick().await;

    info!(interval_ms = period.as_millis() as u64, "TTL sweeper started");

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let removed = store.sweep_expired();
                if removed > 0 {
                    info!(removed, remaining = store.len(), "TTL sweep removed expired entries");
                } else {
                    debug!(remaining = store.len(), "TTL sweep found no expired entries");
                }
            }
        }
    }

    info!("TTL sweeper stopped");
}
