//! Cache Statistics Module
//!
//! Occupancy snapshot plus hit, miss and eviction counters.

use serde::Serialize;

use crate::cache::CacheKey;

// == Cache Counters ==
/// Running counters kept by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that found nothing, or only an expired entry
    pub misses: u64,
    /// Entries removed to make room for a new key
    pub evictions: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Read-only snapshot of the cache.
///
/// `size` and `entries` describe physical occupancy: keys whose TTL has
/// lapsed but that have not been evicted or invalidated are still listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of stored entries
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Configured validity window in whole seconds
    pub ttl_seconds: u64,
    /// Configured validity window in milliseconds, as applied to entries
    pub ttl_ms: u64,
    /// Stored keys, sorted
    pub entries: Vec<CacheKey>,
    /// Lifetime counters
    #[serde(flatten)]
    pub counters: CacheCounters,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.counters.hits + self.counters.misses;
        if total == 0 {
            0.0
        } else {
            self.counters.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(counters: CacheCounters) -> CacheStats {
        CacheStats {
            size: 0,
            max_size: 10,
            ttl_seconds: 300,
            ttl_ms: 300_000,
            entries: Vec::new(),
            counters,
        }
    }

    #[test]
    fn test_counters_new() {
        let counters = CacheCounters::default();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(stats_with(CacheCounters::default()).hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(stats_with(counters).hit_rate(), 0.75);
    }

    #[test]
    fn test_record_eviction() {
        let mut counters = CacheCounters::default();
        counters.record_eviction();
        counters.record_eviction();
        assert_eq!(counters.evictions, 2);
    }

    #[test]
    fn test_stats_serialize_flattens_counters() {
        let mut counters = CacheCounters::default();
        counters.record_miss();
        let json = serde_json::to_value(stats_with(counters)).unwrap();

        assert_eq!(json["size"], 0);
        assert_eq!(json["max_size"], 10);
        assert_eq!(json["ttl_seconds"], 300);
        assert_eq!(json["misses"], 1);
        assert!(json["entries"].as_array().unwrap().is_empty());
    }
}
