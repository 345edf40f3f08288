//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheKey, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, InvalidateResponse, StatsQuery, StatsResponse};

/// Application state shared across all handlers.
///
/// Memoized query results are JSON documents, so the cache stores
/// `serde_json::Value`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe memoization cache
    pub cache: SharedCache<Value>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SharedCache<Value>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SharedCache::from_config(config))
    }
}

/// Handler for GET /stats
///
/// Returns occupancy, configured bounds and counters.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;

    Json(StatsResponse::from_stats(stats, query.include_entries))
}

/// Handler for DELETE /cache/:key
///
/// Invalidates one key. An absent key is not an error.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let key = CacheKey::parse(&raw_key)?;
    let removed = state.cache.invalidate(Some(&key)).await > 0;

    Ok(Json(InvalidateResponse::new(key, removed)))
}

/// Handler for DELETE /cache
///
/// Clears every entry, e.g. after an upstream data refresh.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.invalidate(None).await;

    Json(ClearResponse { removed })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
