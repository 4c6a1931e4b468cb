//! Cache Store Module
//!
//! Main cache engine combining hashed-key HashMap storage with TTL
//! expiration and approximate-LRU eviction.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::cache::key::hash_key;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Bounded, TTL-aware key/value store with hit/miss accounting.
///
/// Callers pass logical keys; the store indexes entries by their SHA-256
/// hash. All operations are synchronous and complete without suspending,
/// so a store shared behind a lock never exposes a half-applied mutation.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Hashed key -> entry
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl_ms: u64,
    /// Successful retrievals since construction or last clear
    hits: u64,
    /// Failed retrievals since construction or last clear
    misses: u64,
    /// Capacity evictions for the store's lifetime; survives clear
    evictions: u64,
    /// Monotonic counter stamped onto entries on insert and read
    access_seq: u64,
}

impl<V: Serialize + Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl_ms` - TTL in milliseconds used when `set` gets no explicit TTL
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            default_ttl_ms,
            hits: 0,
            misses: 0,
            evictions: 0,
            access_seq: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by logical key.
    ///
    /// Returns the value if found and not expired, updating the entry's
    /// access metadata. Expired entries are removed on the spot and
    /// counted as misses, as are absent keys.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let hashed = hash_key(key);

        let hit = match self.entries.get_mut(&hashed) {
            None => {
                self.misses += 1;
                return None;
            }
            Some(entry) if entry.is_expired() => None,
            Some(entry) => {
                self.access_seq += 1;
                entry.touch(self.access_seq);
                Some(entry.data.clone())
            }
        };

        match hit {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                // Expired: lazy removal, counted as a miss
                self.entries.remove(&hashed);
                self.misses += 1;
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL in milliseconds.
    ///
    /// If the key already exists, the value is overwritten and the TTL is
    /// reset. Whenever the store is at capacity before an insertion, the
    /// least recently accessed entry is evicted first, so the capacity
    /// bound holds after every call. Never fails: unserializable values
    /// simply get a zero size estimate.
    pub fn set(&mut self, key: &str, value: V, ttl_ms: Option<u64>) {
        if self.entries.len() >= self.max_entries {
            self.evict_lru();
        }

        let effective_ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.access_seq += 1;
        let entry = CacheEntry::new(value, key.to_string(), effective_ttl, self.access_seq);
        self.entries.insert(hash_key(key), entry);
    }

    // == Evict LRU ==
    /// Removes the entry with the oldest access metadata.
    ///
    /// O(n) scan over the bounded store; millisecond timestamp ties are
    /// broken by the access sequence number, keeping the victim choice
    /// deterministic.
    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_accessed_at, entry.access_seq))
            .map(|(hashed, entry)| (hashed.clone(), entry.logical_key.clone()));

        if let Some((hashed, logical_key)) = victim {
            self.entries.remove(&hashed);
            self.evictions += 1;
            debug!(key = %logical_key, "evicted least recently used entry");
        }
    }

    // == Delete ==
    /// Removes an entry by logical key, reporting whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(&hash_key(key)).is_some()
    }

    // == Clear ==
    /// Removes all entries and resets the hit/miss counters.
    ///
    /// The eviction counter is intentionally left alone: it measures
    /// capacity pressure over the store's lifetime, not hit/miss behavior.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    // == Prune ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose logical key contains `pattern` as a
    /// literal substring; returns the number removed.
    ///
    /// Matching runs against the retained logical key, not the hashed
    /// index: hashes are irreversible, so a substring of caller key text
    /// could never match them.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.logical_key.contains(pattern));
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!(pattern, removed, "invalidated entries by key pattern");
        }
        removed
    }

    // == Stats ==
    /// Returns a snapshot of current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let size = self.entries.len();
        let total_size_bytes = self
            .entries
            .values()
            .map(|entry| entry.approx_size_bytes)
            .sum();

        CacheStats {
            size,
            max_size: self.max_entries,
            total_size_bytes,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate: CacheStats::hit_rate_pct(self.hits, self.misses),
            utilization: CacheStats::utilization_pct(size, self.max_entries),
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == TTL Remaining ==
    /// Remaining TTL in milliseconds for an unexpired entry, if present.
    /// Diagnostics helper; does not touch access metadata or counters.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.entries
            .get(&hash_key(key))
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.ttl_remaining_ms())
    }
}
