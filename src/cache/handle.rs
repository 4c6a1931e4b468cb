//! Cache Handle Module
//!
//! Cloneable async front for a shared [`CacheStore`], adding the
//! read-through `get_or_fetch` helper and the auto-prune lifecycle.

use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_prune_task;

// == Cache ==
/// Shared handle to an in-memory response cache.
///
/// Clones are cheap and all point at the same store. Every store
/// mutation runs as an atomic, non-suspending step under the write
/// lock; the fetch inside [`Cache::get_or_fetch`] is the only
/// suspension point and runs with the lock released.
///
/// The handle owns no ambient lifecycle: the host application calls
/// [`Cache::start_auto_prune`] during startup and
/// [`Cache::stop_auto_prune`] during shutdown.
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    prune_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    prune_interval_ms: u64,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            prune_task: Arc::clone(&self.prune_task),
            prune_interval_ms: self.prune_interval_ms,
        }
    }
}

impl<V: Serialize + Clone + Send + Sync + 'static> Cache<V> {
    // == Constructor ==
    /// Creates a cache from the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(
                config.max_entries,
                config.default_ttl_ms,
            ))),
            prune_task: Arc::new(Mutex::new(None)),
            prune_interval_ms: config.prune_interval_ms,
        }
    }

    // == Get ==
    /// Retrieves a value by logical key. See [`CacheStore::get`].
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Set ==
    /// Stores a value with an optional TTL in milliseconds.
    /// See [`CacheStore::set`].
    pub async fn set(&self, key: &str, value: V, ttl_ms: Option<u64>) {
        self.store.write().await.set(key, value, ttl_ms);
    }

    // == Delete ==
    /// Removes an entry, reporting whether one was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Clear ==
    /// Drops all entries and resets the hit/miss counters.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Prune ==
    /// Removes all expired entries, returning the count removed.
    pub async fn prune(&self) -> usize {
        self.store.write().await.prune()
    }

    // == Invalidate Pattern ==
    /// Removes entries whose logical key contains the given substring.
    pub async fn invalidate_pattern(&self, pattern: &str) -> usize {
        self.store.write().await.invalidate_pattern(pattern)
    }

    // == Stats ==
    /// Returns a snapshot of current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, fetching it on a miss.
    ///
    /// On a miss the lock is released, `fetch` is awaited, and a
    /// successful result is stored under `ttl_ms` (default TTL when
    /// `None`) before being returned. A failed fetch writes nothing and
    /// surfaces as [`CacheError::FetchFailed`] carrying the key and the
    /// underlying cause, so the next call simply retries.
    ///
    /// There is no single-flight de-duplication: concurrent callers that
    /// miss on the same key each invoke their own `fetch`.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl_ms: Option<u64>, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        let value = fetch().await.map_err(|source| CacheError::FetchFailed {
            key: key.to_string(),
            source,
        })?;

        self.set(key, value.clone(), ttl_ms).await;
        Ok(value)
    }

    // == Start Auto Prune ==
    /// Arms the recurring background prune task, at `interval_ms` or the
    /// configured interval when `None`. Calling this while a task is
    /// already running is a logged no-op; no second task is spawned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_auto_prune(&self, interval_ms: Option<u64>) {
        let mut slot = self
            .prune_task
            .lock()
            .expect("prune task lock poisoned");

        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            warn!("auto-prune already running, ignoring start request");
            return;
        }

        let interval = interval_ms.unwrap_or(self.prune_interval_ms);
        *slot = Some(spawn_prune_task(Arc::clone(&self.store), interval));
    }

    // == Stop Auto Prune ==
    /// Disarms the background prune task. Idempotent; safe to call from
    /// the host's shutdown path whether or not pruning was started.
    pub fn stop_auto_prune(&self) {
        let mut slot = self
            .prune_task
            .lock()
            .expect("prune task lock poisoned");

        if let Some(task) = slot.take() {
            task.abort();
            debug!("auto-prune task stopped");
        }
    }
}
