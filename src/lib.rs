//! Memo Cache - In-process memoization with TTL expiry
//!
//! Caches the results of expensive, argument-deterministic operations under
//! a fingerprint of their arguments, with a fixed time-to-live and a size
//! bound enforced by evicting the oldest entry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheKey, CacheStore, CallArgs, Memoized, SharedCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
