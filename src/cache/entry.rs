//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

// == Cache Entry ==
/// Represents a single cache entry with its value and access metadata.
///
/// Entries are indexed by the hashed form of the logical key, but retain
/// the logical key itself so that substring invalidation can target
/// caller-meaningful key text (hashes are irreversible).
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, opaque to the cache
    pub data: V,
    /// The caller-supplied key, kept alongside the hashed index
    pub logical_key: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Last successful read timestamp (Unix milliseconds); drives eviction
    pub last_accessed_at: u64,
    /// Store-issued access sequence number; breaks millisecond ties so
    /// eviction order is deterministic
    pub access_seq: u64,
    /// Best-effort size of `data` in bytes, computed once at insertion
    pub approx_size_bytes: usize,
}

impl<V: Serialize> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_ms` milliseconds from now.
    ///
    /// A TTL of 0 produces an entry that is already expired on the next
    /// read. Size estimation never fails: unserializable values degrade
    /// to a zero estimate.
    pub fn new(data: V, logical_key: String, ttl_ms: u64, access_seq: u64) -> Self {
        let now = current_timestamp_ms();
        let approx_size_bytes = estimate_size(&data);

        Self {
            data,
            logical_key,
            expires_at: now + ttl_ms,
            last_accessed_at: now,
            access_seq,
            approx_size_bytes,
        }
    }
}

impl<V> CacheEntry<V> {
    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time, so a zero TTL is a
    /// hard cutover with no readable window.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Marks the entry as just read, refreshing its eviction metadata.
    pub fn touch(&mut self, access_seq: u64) {
        self.last_accessed_at = current_timestamp_ms();
        self.access_seq = access_seq;
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 if already expired.
    ///
    /// Useful for debugging and statistics purposes.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Size Estimation ==
/// Best-effort byte size of a value via its JSON serialization.
///
/// Values that fail to serialize yield 0 rather than an error; the
/// estimate is a diagnostics signal, not an accounting guarantee.
fn estimate_size<V: Serialize>(data: &V) -> usize {
    serde_json::to_vec(data).map(|bytes| bytes.len()).unwrap_or(0)
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
