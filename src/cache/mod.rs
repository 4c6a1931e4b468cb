//! Cache Module
//!
//! Provides in-memory response caching with TTL expiration, hashed
//! storage keys, and approximate-LRU eviction.

mod entry;
mod handle;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use key::hash_key;
pub use stats::CacheStats;
pub use store::CacheStore;
