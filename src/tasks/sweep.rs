//! Expired-entry sweep
//!
//! Background task that periodically removes expired cache entries so keys
//! nobody reads again do not accumulate.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a task that sweeps `cache` every `interval` for as long as the
/// process runs.
///
/// The first sweep happens one full interval after spawning. A zero interval
/// is raised to one second. Abort the returned handle during shutdown.
///
/// # Example
/// ```ignore
/// let cache = ResponseCache::new(Duration::from_secs(300));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: ResponseCache, interval: Duration) -> JoinHandle<()> {
    let interval = if interval.is_zero() {
        Duration::from_secs(1)
    } else {
        interval
    };

    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep().await;
            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
