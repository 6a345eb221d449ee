//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task sleeps for the configured interval between passes and takes the
/// write lock only for the duration of each scan-and-delete pass, so it
/// never starves foreground operations.
///
/// Cancellation is via [`JoinHandle::abort`]: the abort lands at the sleep
/// await point, so a pass already scanning finishes but no further pass is
/// scheduled.
///
/// # Arguments
/// * `store` - Shared reference to the cache core
/// * `interval` - Time between sweep passes
pub fn spawn_sweep_task(store: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry sweep task with interval {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store_guard = store.write().await;
                store_guard.remove_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
