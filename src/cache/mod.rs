//! Cache Module
//!
//! Provides in-process memoization with TTL expiry and oldest-entry eviction.

mod clock;
mod entry;
mod finite;
mod key;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{derive_key, CacheKey, CallArgs};
pub use shared::{Memoized, SharedCache};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
