//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheKey, CacheStats};

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of stored entries, stale ones included
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Configured validity window in whole seconds
    pub ttl_seconds: u64,
    /// Configured validity window in milliseconds
    pub ttl_ms: u64,
    /// Stored keys, omitted when not requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<CacheKey>>,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Builds the response from a cache snapshot
    pub fn from_stats(stats: CacheStats, include_entries: bool) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            size: stats.size,
            max_size: stats.max_size,
            ttl_seconds: stats.ttl_seconds,
            ttl_ms: stats.ttl_ms,
            entries: include_entries.then_some(stats.entries),
            hits: stats.counters.hits,
            misses: stats.counters.misses,
            evictions: stats.counters.evictions,
            hit_rate,
        }
    }
}

/// Response body for single-key invalidation (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The key that was targeted
    pub key: CacheKey,
    /// Whether an entry was actually removed
    pub removed: bool,
}

impl InvalidateResponse {
    pub fn new(key: CacheKey, removed: bool) -> Self {
        Self { key, removed }
    }
}

/// Response body for a full clear (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
