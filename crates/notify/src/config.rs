//! Engine configuration loaded from environment variables.

use std::time::Duration;

/// Default TTL for cached configuration lookups, in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Default upper bound on concurrently processed recipients per fan-out.
const DEFAULT_MAX_CONCURRENT_DELIVERIES: usize = 8;

/// Default per-recipient delivery timeout, in seconds.
const DEFAULT_RECIPIENT_TIMEOUT_SECS: u64 = 5;

/// Notification engine configuration.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long resolved event types may be served from cache.
    pub cache_ttl: Duration,
    /// Upper bound on concurrently processed recipients per fan-out.
    pub max_concurrent_deliveries: usize,
    /// Per-recipient delivery timeout; a recipient that exceeds it fails
    /// alone without stalling the rest of the fan-out.
    pub recipient_timeout: Duration,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default |
    /// |-----------------------------------|---------|
    /// | `NOTIFY_CACHE_TTL_SECS`           | `30`    |
    /// | `NOTIFY_MAX_CONCURRENT_DELIVERIES`| `8`     |
    /// | `NOTIFY_RECIPIENT_TIMEOUT_SECS`   | `5`     |
    ///
    /// Unparseable values fall back to the default with a warning rather
    /// than aborting the host application.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            cache_ttl: Duration::from_secs(env_or(
                "NOTIFY_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            max_concurrent_deliveries: env_or(
                "NOTIFY_MAX_CONCURRENT_DELIVERIES",
                DEFAULT_MAX_CONCURRENT_DELIVERIES,
            ),
            recipient_timeout: Duration::from_secs(env_or(
                "NOTIFY_RECIPIENT_TIMEOUT_SECS",
                DEFAULT_RECIPIENT_TIMEOUT_SECS,
            )),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_concurrent_deliveries: DEFAULT_MAX_CONCURRENT_DELIVERIES,
            recipient_timeout: Duration::from_secs(DEFAULT_RECIPIENT_TIMEOUT_SECS),
        }
    }
}

/// Read an env var and parse it, falling back to `default` when the
/// variable is unset or unparseable.
fn env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    match std::env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(var, value = %raw, "Unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.max_concurrent_deliveries, 8);
        assert_eq!(config.recipient_timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("NOTIFY_TEST_GARBAGE", "not-a-number");
        let value: u64 = env_or("NOTIFY_TEST_GARBAGE", 7);
        assert_eq!(value, 7);
        std::env::remove_var("NOTIFY_TEST_GARBAGE");
    }

    #[test]
    fn env_or_reads_valid_values() {
        std::env::set_var("NOTIFY_TEST_VALID", "42");
        let value: u64 = env_or("NOTIFY_TEST_VALID", 7);
        assert_eq!(value, 42);
        std::env::remove_var("NOTIFY_TEST_VALID");
    }
}
