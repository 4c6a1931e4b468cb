//! Cache Statistics Module
//!
//! Point-in-time snapshot of cache performance metrics.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache metrics, taken by [`CacheStore::stats`].
///
/// [`CacheStore::stats`]: crate::cache::CacheStore::stats
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Capacity bound fixed at construction
    pub max_size: usize,
    /// Sum of per-entry size estimates in bytes (approximate)
    pub total_size_bytes: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Hits as a percentage of all retrievals, 0.0 when none occurred
    pub hit_rate: f64,
    /// Entries as a percentage of capacity
    pub utilization: f64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Hit percentage for the given counters, 0.0 when no retrievals
    /// have been made (avoids divide-by-zero).
    pub fn hit_rate_pct(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64 * 100.0
        }
    }

    // == Utilization ==
    /// Occupancy percentage for the given size and capacity.
    pub fn utilization_pct(size: usize, max_size: usize) -> f64 {
        if max_size == 0 {
            0.0
        } else {
            size as f64 / max_size as f64 * 100.0
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::hit_rate_pct(0, 0), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        assert_eq!(CacheStats::hit_rate_pct(3, 0), 100.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        assert_eq!(CacheStats::hit_rate_pct(0, 2), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        assert_eq!(CacheStats::hit_rate_pct(1, 1), 50.0);
        assert_eq!(CacheStats::hit_rate_pct(3, 1), 75.0);
    }

    #[test]
    fn test_utilization() {
        assert_eq!(CacheStats::utilization_pct(0, 100), 0.0);
        assert_eq!(CacheStats::utilization_pct(50, 100), 50.0);
        assert_eq!(CacheStats::utilization_pct(100, 100), 100.0);
    }

    #[test]
    fn test_utilization_zero_capacity() {
        assert_eq!(CacheStats::utilization_pct(0, 0), 0.0);
    }

    #[test]
    fn test_stats_serializes_to_json() {
        let stats = CacheStats {
            size: 2,
            max_size: 10,
            total_size_bytes: 64,
            hits: 3,
            misses: 1,
            evictions: 0,
            hit_rate: 75.0,
            utilization: 20.0,
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["hit_rate"], 75.0);
        assert_eq!(json["utilization"], 20.0);
    }
}
