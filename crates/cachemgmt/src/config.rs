use std::{env, fmt, str::FromStr, time::Duration};

use thiserror::Error;

/// What the event bus does when an event handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and keep dispatching to the remaining handlers.
    /// The write that published the event still succeeds.
    #[default]
    Isolate,
    /// Stop at the first failing handler and fail the publishing write.
    Propagate,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown event failure policy '{0}' (expected 'isolate' or 'propagate')")]
pub struct UnknownFailurePolicy(String);

impl FromStr for FailurePolicy {
    type Err = UnknownFailurePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(FailurePolicy::Isolate),
            "propagate" => Ok(FailurePolicy::Propagate),
            other => Err(UnknownFailurePolicy(other.to_string())),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Isolate => f.write_str("isolate"),
            FailurePolicy::Propagate => f.write_str("propagate"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "cachemgmt.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Event handler failure policy (default: isolate)
    pub event_failure_policy: FailurePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "cachemgmt.db")
    /// - `EVENT_FAILURE_POLICY` - `isolate` or `propagate` (default: isolate)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(10_000),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "cachemgmt.db".to_string()),
            event_failure_policy: env::var("EVENT_FAILURE_POLICY")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(policy) => Some(policy),
                    Err(err) => {
                        tracing::warn!(error = %err, "Falling back to the default failure policy");
                        None
                    }
                })
                .unwrap_or_default(),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
