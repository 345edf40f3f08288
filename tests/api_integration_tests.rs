//! Integration Tests for API Endpoints
//!
//! Drives the admin router against a cache populated through `Memoized`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use memo_cache::cache::ManualClock;
use memo_cache::{api::create_router, AppState, CacheError, CacheStore, SharedCache};
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

#[derive(Serialize)]
struct DividendQuery {
    symbol: String,
    years: u32,
}

fn query(symbol: &str, years: u32) -> DividendQuery {
    DividendQuery {
        symbol: symbol.to_string(),
        years,
    }
}

fn create_cache(max_size: usize, ttl_secs: u64) -> (SharedCache<Value>, ManualClock) {
    let clock = ManualClock::new(0);
    let store = CacheStore::with_clock(max_size, Duration::from_secs(ttl_secs), Arc::new(clock.clone()));
    (SharedCache::new(store), clock)
}

fn create_app(cache: &SharedCache<Value>) -> Router {
    create_router(AppState::new(cache.clone()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_empty() {
    let (cache, _clock) = create_cache(1000, 300);
    let app = create_app(&cache);

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], 0);
    assert_eq!(json["max_size"], 1000);
    assert_eq!(json["ttl_seconds"], 300);
    assert_eq!(json["ttl_ms"], 300_000);
    assert_eq!(json["entries"], json!([]));
    assert_eq!(json["hit_rate"], 0.0);
}

#[tokio::test]
async fn test_stats_reflect_memoized_calls() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);

    let summary = cache.memoize("dividend_summary", |q: DividendQuery| async move {
        Ok::<_, CacheError>(json!({ "symbol": q.symbol, "years": q.years }))
    });

    summary.call(query("KO", 5)).await.unwrap();
    summary.call(query("KO", 5)).await.unwrap();
    summary.call(query("PEP", 5)).await.unwrap();

    let (status, json) = send(&app, "GET", "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], 2);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);

    let listed: Vec<String> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k.as_str().unwrap().to_string())
        .collect();
    let ko_key = summary.key_for(&query("KO", 5)).unwrap();
    assert!(listed.contains(&ko_key.to_string()));
}

#[tokio::test]
async fn test_stats_without_entries() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);

    let (status, json) = send(&app, "GET", "/stats?include_entries=false").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("entries").is_none());
}

#[tokio::test]
async fn test_stats_list_expired_entries_until_removed() {
    let (cache, clock) = create_cache(100, 1);
    let app = create_app(&cache);

    let quote = cache.memoize("quote", |symbol: String| async move {
        Ok::<_, CacheError>(json!(symbol))
    });
    quote.call("T".to_string()).await.unwrap();
    clock.advance(Duration::from_secs(5));

    let (_, json) = send(&app, "GET", "/stats").await;
    assert_eq!(json["size"], 1, "Lazy expiry keeps stale entries in stats");
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_endpoint_forces_recompute() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let summary = cache.memoize("dividend_summary", move |q: DividendQuery| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, CacheError>(json!(q.symbol)) }
    });

    summary.call(query("MO", 3)).await.unwrap();
    let key = summary.key_for(&query("MO", 3)).unwrap();

    let (status, json) = send(&app, "DELETE", &format!("/cache/{key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], key.as_str());
    assert_eq!(json["removed"], true);

    summary.call(query("MO", 3)).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalidate_absent_key_is_ok() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);
    let absent = "0".repeat(64);

    let (status, json) = send(&app, "DELETE", &format!("/cache/{absent}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);
}

#[tokio::test]
async fn test_invalidate_malformed_key() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);

    let (status, json) = send(&app, "DELETE", "/cache/AAPL").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("hex"));
}

#[tokio::test]
async fn test_clear_endpoint() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);

    let summary = cache.memoize("dividend_summary", |q: DividendQuery| async move {
        Ok::<_, CacheError>(json!(q.years))
    });
    for years in 1..=3 {
        summary.call(query("JNJ", years)).await.unwrap();
    }

    let (status, json) = send(&app, "DELETE", "/cache").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 3);

    let (_, json) = send(&app, "GET", "/stats").await;
    assert_eq!(json["size"], 0);
}

// == Eviction Through The Service ==

#[tokio::test]
async fn test_capacity_eviction_visible_in_stats() {
    let (cache, clock) = create_cache(2, 300);
    let app = create_app(&cache);

    let summary = cache.memoize("dividend_summary", |q: DividendQuery| async move {
        Ok::<_, CacheError>(json!(q.symbol))
    });

    for symbol in ["K1", "K2", "K3"] {
        summary.call(query(symbol, 1)).await.unwrap();
        clock.advance(Duration::from_secs(1));
    }

    let (_, json) = send(&app, "GET", "/stats").await;
    assert_eq!(json["size"], 2);
    assert_eq!(json["evictions"], 1);

    let first = summary.key_for(&query("K1", 1)).unwrap();
    assert!(!cache.stats().await.entries.contains(&first));
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (cache, _clock) = create_cache(100, 300);
    let app = create_app(&cache);

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
