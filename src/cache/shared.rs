//! Shared Cache Module
//!
//! Thread-safe handle around a `CacheStore` and the memoizing wrapper built
//! on top of it.
//!
//! The lock is never held while a computation runs. Two concurrent calls
//! that miss on the same key will both compute, and the later store wins.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::{CacheKey, CacheStats, CacheStore, CallArgs};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Shared Cache ==
/// Cloneable, lock-protected cache handle.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps an existing store.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a shared cache from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::from_config(config))
    }

    pub async fn is_valid(&self, key: &CacheKey) -> bool {
        self.inner.read().await.is_valid(key)
    }

    /// Returns the value for a fresh entry, recording a hit or miss.
    pub async fn lookup(&self, key: &CacheKey) -> Option<V> {
        // Write lock: lookups update counters
        self.inner.write().await.lookup(key)
    }

    /// Stores a value, evicting the oldest entry first if needed.
    pub async fn insert(&self, key: CacheKey, value: V) {
        self.inner.write().await.insert(key, value);
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or runs `compute` and stores its
    /// result.
    ///
    /// Errors from `compute` are returned unchanged and never cached.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &CacheKey, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.lookup(key).await {
            return Ok(value);
        }

        let value = compute().await?;
        self.insert(key.clone(), value.clone()).await;
        Ok(value)
    }

    /// Removes one key, or everything when `key` is `None`.
    pub async fn invalidate(&self, key: Option<&CacheKey>) -> usize {
        let removed = self.inner.write().await.invalidate(key);
        match key {
            Some(key) => tracing::debug!(key = %key, removed, "cache key invalidated"),
            None => tracing::info!(removed, "cache cleared"),
        }
        removed
    }

    /// Physically removes stale entries.
    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Memoize ==
    /// Wraps `func` so each call is answered from this cache when possible.
    ///
    /// `scope` is folded into every key, so several functions can share one
    /// cache without colliding on equal arguments.
    pub fn memoize<A, F>(&self, scope: impl Into<String>, func: F) -> Memoized<A, V, F> {
        Memoized {
            cache: self.clone(),
            scope: scope.into(),
            func,
            _args: PhantomData,
        }
    }
}

// == Memoized ==
/// A function whose results are cached by argument fingerprint.
///
/// ```
/// use std::time::Duration;
/// use memo_cache::cache::{CacheStore, SharedCache};
/// use memo_cache::error::CacheError;
///
/// # fn main() -> Result<(), CacheError> {
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache: SharedCache<f64> = SharedCache::new(CacheStore::new(100, Duration::from_secs(300)));
/// let dividend_yield = cache.memoize("dividend_yield", |(symbol, years): (String, u32)| async move {
///     Ok::<_, CacheError>(symbol.len() as f64 / years as f64)
/// });
///
/// let first = dividend_yield.call(("KO".to_string(), 5)).await?;
/// let second = dividend_yield.call(("KO".to_string(), 5)).await?;
/// assert_eq!(first, second);
/// # Ok::<(), CacheError>(())
/// # })
/// # }
/// ```
pub struct Memoized<A, V, F> {
    cache: SharedCache<V>,
    scope: String,
    func: F,
    _args: PhantomData<fn(A)>,
}

impl<A, V, F> std::fmt::Debug for Memoized<A, V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<A: Serialize, V: Clone, F> Memoized<A, V, F> {
    /// Derives the cache key this call would use.
    ///
    /// The whole argument value is one positional argument, so `None`,
    /// `Some(vec![])` and an empty struct all key differently.
    pub fn key_for(&self, args: &A) -> Result<CacheKey> {
        Ok(CallArgs::new()
            .arg(args)?
            .scoped(self.scope.as_str())
            .derive_key())
    }

    /// Calls the wrapped function through the cache.
    ///
    /// Key derivation failures surface as `E::from(CacheError)`; the wrapped
    /// function's own errors pass through untouched.
    pub async fn call<Fut, E>(&self, args: A) -> std::result::Result<V, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: From<CacheError>,
    {
        let key = self.key_for(&args)?;
        self.cache.get_or_compute(&key, || (self.func)(args)).await
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn cache(&self) -> &SharedCache<V> {
        &self.cache
    }
}
