//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.
//! Values are read once at startup; a variable that is set but unparseable
//! aborts startup instead of falling back to a default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Validity window for memoized results, in seconds
    pub ttl_seconds: u64,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Entry validity in seconds (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_SWEEP_INTERVAL` - Expired-entry sweep period in seconds (default: 0, off)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            ttl_seconds: parse_var(&lookup, "CACHE_TTL_SECONDS", defaults.ttl_seconds)?,
            max_size: parse_var(&lookup, "CACHE_MAX_SIZE", defaults.max_size)?,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            sweep_interval: parse_var(&lookup, "CACHE_SWEEP_INTERVAL", defaults.sweep_interval)?,
        };

        if config.max_size == 0 {
            return Err(CacheError::Config {
                var: "CACHE_MAX_SIZE",
                value: "0".to_string(),
                reason: "cache must hold at least one entry".to_string(),
            });
        }

        Ok(config)
    }

    /// Entry validity as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,
            max_size: 1000,
            server_port: 3000,
            sweep_interval: 0,
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| CacheError::Config {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
