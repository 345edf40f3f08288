//! Cache Store Module
//!
//! Main memoization engine: one map of key to timestamped entry, a fixed
//! TTL, and a capacity bound enforced by evicting the oldest entry.
//!
//! Expiry is lazy. A stale entry is treated as absent by every read but stays
//! in the map until it is refreshed, evicted, invalidated or purged.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheKey, CacheStats, Clock, SystemClock};
use crate::config::Config;

// == Cache Store ==
/// Bounded TTL cache for memoized results.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to value-and-timestamp storage
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Hit, miss and eviction counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Validity window for every entry
    ttl: Duration,
    /// Time source for stamping and ageing entries
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore using the system clock.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `ttl` - How long a stored value stays valid
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self::with_clock(max_size, ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore with an explicit time source.
    ///
    /// Entries are aged in whole milliseconds, so a TTL with a sub-millisecond
    /// part is rounded up. A `max_size` of 0 gives a cache that never stores.
    pub fn with_clock(max_size: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
            max_size,
            ttl,
            clock,
        }
    }

    /// Creates a new CacheStore from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_size, config.ttl())
    }

    fn ttl_ms(&self) -> u64 {
        u64::try_from(self.ttl.as_micros().div_ceil(1_000)).unwrap_or(u64::MAX)
    }

    // == Is Valid ==
    /// Returns true iff `key` is stored and younger than the TTL.
    ///
    /// Absent keys are simply invalid. Nothing is removed or counted.
    pub fn is_valid(&self, key: &CacheKey) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now, self.ttl_ms()))
    }

    // == Lookup ==
    /// Returns a clone of the value if the entry is fresh.
    ///
    /// Records a hit or a miss. A stale entry counts as a miss and is left
    /// in place.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<V> {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, ttl_ms) => {
                self.counters.record_hit();
                debug!(key = %key, "cache hit");
                Some(entry.value.clone())
            }
            Some(entry) => {
                self.counters.record_miss();
                debug!(key = %key, age_ms = entry.age_ms(now), "cache entry expired");
                None
            }
            None => {
                self.counters.record_miss();
                debug!(key = %key, "cache miss");
                None
            }
        }
    }

    // == Insert ==
    /// Stores a value under `key`, stamped with the current time.
    ///
    /// An existing key is refreshed in place. A new key first makes room by
    /// evicting the oldest entry when the cache is full.
    pub fn insert(&mut self, key: CacheKey, value: V) {
        if self.max_size == 0 {
            debug!(key = %key, "cache has no capacity, value not stored");
            return;
        }

        let now = self.clock.now_ms();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, now);
            debug!(key = %key, "cache entry refreshed");
            return;
        }

        self.evict_if_at_capacity();
        self.entries.insert(key, CacheEntry::new(value, now));
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs only when there is no fresh entry. If it fails, the
    /// error is returned unchanged and nothing is stored.
    pub fn get_or_compute<F, E>(&mut self, key: &CacheKey, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.lookup(key) {
            return Ok(value);
        }

        let value = compute()?;
        self.insert(key.clone(), value.clone());
        Ok(value)
    }

    // == Evict If At Capacity ==
    /// Removes the single oldest entry when the cache is full.
    ///
    /// Returns the evicted key. Entries with equal timestamps are broken in
    /// map iteration order, which is unspecified.
    pub fn evict_if_at_capacity(&mut self) -> Option<CacheKey> {
        if self.entries.len() < self.max_size {
            return None;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&oldest);
        self.counters.record_eviction();
        debug!(key = %oldest, "evicted oldest cache entry");
        Some(oldest)
    }

    // == Invalidate ==
    /// Removes one key, or every key when `key` is `None`.
    ///
    /// Returns the number of entries removed; an absent key removes nothing.
    pub fn invalidate(&mut self, key: Option<&CacheKey>) -> usize {
        match key {
            Some(key) => usize::from(self.entries.remove(key).is_some()),
            None => {
                let removed = self.entries.len();
                self.entries.clear();
                removed
            }
        }
    }

    // == Purge Expired ==
    /// Physically removes every stale entry.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| entry.is_fresh(now, ttl_ms));

        before - self.entries.len()
    }

    // == Stats ==
    /// Returns a snapshot of occupancy, bounds and counters.
    pub fn stats(&self) -> CacheStats {
        let mut entries: Vec<CacheKey> = self.entries.keys().cloned().collect();
        entries.sort();

        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            ttl_seconds: self.ttl.as_secs(),
            ttl_ms: self.ttl_ms(),
            entries,
            counters: self.counters,
        }
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is physically stored, regardless of freshness.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
