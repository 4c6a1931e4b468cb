//! TTL Prune Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically prunes expired entries.
///
/// The task loops forever, sleeping for the given interval between
/// passes. Each pass takes the write lock only for the duration of a
/// bounded-size scan, so in-flight reads never observe a half-removed
/// entry. The returned handle is aborted by the host (or by
/// [`Cache::stop_auto_prune`]) during shutdown.
///
/// [`Cache::stop_auto_prune`]: crate::cache::Cache::stop_auto_prune
///
/// # Arguments
/// * `store` - Shared reference to the cache store
/// * `interval_ms` - Interval in milliseconds between prune passes
pub fn spawn_prune_task<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    interval_ms: u64,
) -> JoinHandle<()>
where
    V: Serialize + Clone + Send + Sync + 'static,
{
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        info!("starting auto-prune task with interval of {}ms", interval_ms);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store_guard = store.write().await;
                store_guard.prune()
            };

            if removed > 0 {
                info!("auto-prune: removed {} expired entries", removed);
            } else {
                debug!("auto-prune: no expired entries found");
            }
        }
    })
}
