//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: physically removes stale cache entries. Off unless
//!   `CACHE_SWEEP_INTERVAL` is set, since reads already ignore stale entries.

mod sweep;

pub use sweep::spawn_sweep_task;
