//! Toolcache - An in-memory response cache for API tool layers
//!
//! Provides bounded, TTL-aware caching with hashed storage keys, LRU
//! eviction, background pruning, and a read-through `get_or_fetch`
//! helper for wrapping upstream API calls.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_prune_task;
