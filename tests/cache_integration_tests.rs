//! Integration tests for the cache handle
//!
//! Exercises the shared async `Cache` end-to-end: read-through fetching,
//! TTL expiration, pattern invalidation, statistics, and the auto-prune
//! lifecycle.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use toolcache::{Cache, CacheConfig, CacheError};

fn test_config() -> CacheConfig {
    CacheConfig {
        max_entries: 10,
        default_ttl_ms: 300_000,
        prune_interval_ms: 40,
    }
}

#[tokio::test]
async fn get_or_fetch_caches_api_responses() {
    let cache: Cache<Value> = Cache::new(&test_config());
    let fetch_count = Arc::new(AtomicU32::new(0));

    for _ in 0..3 {
        let fetch_count = fetch_count.clone();
        let quote = cache
            .get_or_fetch("quotes:AAPL", None, || async move {
                fetch_count.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"symbol": "AAPL", "price": 182.5}))
            })
            .await
            .unwrap();
        assert_eq!(quote["symbol"], "AAPL");
    }

    // First call fetched, the other two were served from the cache
    assert_eq!(fetch_count.load(Ordering::SeqCst), 1);

    let stats = cache.stats().await;
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.size, 1);
}

#[tokio::test]
async fn fetch_failure_is_wrapped_and_retryable() {
    let cache: Cache<String> = Cache::new(&test_config());

    let result = cache
        .get_or_fetch("quotes:DOWN", None, || async {
            anyhow::bail!("503 service unavailable")
        })
        .await;

    match result.unwrap_err() {
        CacheError::FetchFailed { key, source } => {
            assert_eq!(key, "quotes:DOWN");
            assert!(source.to_string().contains("503"));
        }
    }

    // The failed fetch wrote nothing; a retry fetches again and succeeds
    let value = cache
        .get_or_fetch("quotes:DOWN", None, || async { Ok("recovered".to_string()) })
        .await
        .unwrap();
    assert_eq!(value, "recovered");
}

#[tokio::test]
async fn concurrent_misses_each_fetch() {
    // Documented behavior: no single-flight de-duplication, so two
    // callers missing on the same key both invoke their fetch.
    let cache: Cache<String> = Cache::new(&test_config());
    let fetch_count = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let cache = cache.clone();
        let fetch_count = fetch_count.clone();
        handles.push(tokio::spawn(async move {
            cache
                .get_or_fetch("quotes:SLOW", None, || async move {
                    fetch_count.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok("slow value".to_string())
                })
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "slow value");
    }
    assert_eq!(fetch_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn explicit_ttl_overrides_default() {
    let cache: Cache<String> = Cache::new(&test_config());

    cache.set("short", "value".to_string(), Some(40)).await;
    cache.set("long", "value".to_string(), None).await;

    assert!(cache.get("short").await.is_some());

    tokio::time::sleep(Duration::from_millis(70)).await;

    assert_eq!(cache.get("short").await, None);
    assert!(cache.get("long").await.is_some());
}

#[tokio::test]
async fn invalidate_pattern_targets_one_endpoint() {
    let cache: Cache<String> = Cache::new(&test_config());

    cache.set("quotes:AAPL", "a".to_string(), None).await;
    cache.set("quotes:MSFT", "m".to_string(), None).await;
    cache.set("profile:AAPL", "p".to_string(), None).await;

    let removed = cache.invalidate_pattern("quotes:").await;
    assert_eq!(removed, 2);

    assert_eq!(cache.get("quotes:AAPL").await, None);
    assert_eq!(cache.get("quotes:MSFT").await, None);
    assert!(cache.get("profile:AAPL").await.is_some());
}

#[tokio::test]
async fn clear_resets_counters_but_not_evictions() {
    let config = CacheConfig {
        max_entries: 1,
        ..test_config()
    };
    let cache: Cache<String> = Cache::new(&config);

    cache.set("a", "1".to_string(), None).await;
    cache.set("b", "2".to_string(), None).await; // evicts "a"
    cache.get("b").await;
    cache.get("missing").await;

    cache.clear().await;

    let stats = cache.stats().await;
    assert_eq!(stats.size, 0);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 1);
}

#[tokio::test]
async fn stats_report_capacity_and_sizes() {
    let cache: Cache<Value> = Cache::new(&test_config());

    cache
        .set("quotes:AAPL", json!({"price": 182.5}), None)
        .await;
    cache.get("quotes:AAPL").await;

    let stats = cache.stats().await;
    assert_eq!(stats.size, 1);
    assert_eq!(stats.max_size, 10);
    assert_eq!(stats.utilization, 10.0);
    assert_eq!(stats.hit_rate, 100.0);
    assert!(stats.total_size_bytes > 0);
}

#[tokio::test]
async fn auto_prune_removes_expired_entries_in_background() {
    let cache: Cache<String> = Cache::new(&test_config());

    cache.set("expire_soon", "value".to_string(), Some(30)).await;
    cache.set("long_lived", "value".to_string(), None).await;

    cache.start_auto_prune(None);

    tokio::time::sleep(Duration::from_millis(120)).await;

    // The pruner removed the expired entry without any read touching it
    let stats = cache.stats().await;
    assert_eq!(stats.size, 1);
    assert!(cache.get("long_lived").await.is_some());

    cache.stop_auto_prune();
}

#[tokio::test]
async fn prune_on_demand_reports_removed_count() {
    let cache: Cache<String> = Cache::new(&test_config());

    cache.set("gone1", "v".to_string(), Some(0)).await;
    cache.set("gone2", "v".to_string(), Some(0)).await;
    cache.set("kept", "v".to_string(), None).await;

    assert_eq!(cache.prune().await, 2);
    assert_eq!(cache.prune().await, 0);
    assert!(cache.get("kept").await.is_some());
}
