//! Cache Entry Module
//!
//! Defines a memoized value together with the time it was stored.

// == Cache Entry ==
/// A memoized result and its insertion/refresh timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The memoized value, opaque to the cache
    pub value: V,
    /// Insertion or last refresh time (milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    ///
    /// A clock that reads earlier than `stored_at` yields 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within its validity window.
    ///
    /// Boundary condition: an entry whose age equals the TTL is already
    /// expired, so a zero TTL makes every entry stale.
    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }

    // == Refresh ==
    /// Replaces the value and resets the timestamp.
    pub fn refresh(&mut self, value: V, now_ms: u64) {
        self.value = value;
        self.stored_at = now_ms;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 42);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.stored_at, 42);
    }

    #[test]
    fn test_entry_fresh_within_ttl() {
        let entry = CacheEntry::new(1, 1_000);

        assert!(entry.is_fresh(1_000, 1_000));
        assert!(entry.is_fresh(1_999, 1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1, 1_000);

        // Age equal to TTL is expired
        assert!(!entry.is_fresh(2_000, 1_000));
        assert!(!entry.is_fresh(5_000, 1_000));
    }

    #[test]
    fn test_zero_ttl_never_fresh() {
        let entry = CacheEntry::new(1, 1_000);
        assert!(!entry.is_fresh(1_000, 0));
    }

    #[test]
    fn test_age_with_clock_behind() {
        let entry = CacheEntry::new(1, 1_000);
        assert_eq!(entry.age_ms(500), 0);
        assert!(entry.is_fresh(500, 1));
    }

    #[test]
    fn test_refresh_overwrites_value_and_timestamp() {
        let mut entry = CacheEntry::new("old", 1_000);
        entry.refresh("new", 3_000);

        assert_eq!(entry.value, "new");
        assert_eq!(entry.stored_at, 3_000);
        assert_eq!(entry.age_ms(3_500), 500);
    }
}
