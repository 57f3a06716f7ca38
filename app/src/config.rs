//! Configuration management for TaskFlow.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary calls `dotenvy::dotenv()` first, so a `.env` file works too.

use crate::client::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Todos API endpoint (`TASKFLOW_API_URL`)
    pub api_url: String,
    /// HTTP request timeout in seconds (`TASKFLOW_HTTP_TIMEOUT_SECS`)
    pub http_timeout: u64,
    /// Log level used when `RUST_LOG` is unset (`TASKFLOW_LOG_LEVEL`)
    pub log_level: String,
    /// Search term applied by the demo session (`TASKFLOW_SEARCH`)
    pub search: Option<String>,
    /// Graceful shutdown timeout in seconds (`TASKFLOW_SHUTDOWN_TIMEOUT_SECS`)
    pub shutdown_timeout: u64,
}

impl Config {
    /// Load configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("TASKFLOW_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout: lookup("TASKFLOW_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            log_level: lookup("TASKFLOW_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            search: lookup("TASKFLOW_SEARCH").filter(|s| !s.trim().is_empty()),
            shutdown_timeout: lookup("TASKFLOW_SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    /// HTTP request timeout
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// How long to wait for in-flight effects on shutdown
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
