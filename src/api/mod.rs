//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /stats` - Cache occupancy, bounds and counters
//! - `DELETE /cache/:key` - Invalidate one key
//! - `DELETE /cache` - Invalidate everything
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
