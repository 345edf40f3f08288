//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

fn default_include_entries() -> bool {
    true
}

/// Query string for the stats endpoint (GET /stats)
///
/// # Fields
/// - `include_entries`: whether to list stored keys (default: true)
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    #[serde(default = "default_include_entries")]
    pub include_entries: bool,
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            include_entries: default_include_entries(),
        }
    }
}
