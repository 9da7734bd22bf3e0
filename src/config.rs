//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::MAX_TTL;
use crate::retry::RetryPolicy;

/// Shortest allowed sweep interval in seconds
const MIN_SWEEP_INTERVAL: u64 = 1;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds for cache writes that do not supply one
    pub default_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Retries after the first attempt on rate-limit errors
    pub retry_max: u32,
    /// Base of the linear backoff curve, in milliseconds
    pub retry_base_delay_ms: u64,
    /// Wait used when a 429 carries no usable `Retry-After`
    pub retry_after_fallback_secs: u64,
    /// Default outbound request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default cache TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `RETRY_MAX` - Retries on HTTP 429 (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - Backoff base in ms (default: 2000)
    /// - `RETRY_AFTER_FALLBACK_SECS` - Wait when no retry hint (default: 2)
    /// - `REQUEST_TIMEOUT_SECS` - Outbound request timeout (default: 30)
    ///
    /// Out-of-range values are clamped, see [`sanitized`](Self::sanitized).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            retry_max: env_or("RETRY_MAX", defaults.retry_max),
            retry_base_delay_ms: env_or("RETRY_BASE_DELAY_MS", defaults.retry_base_delay_ms),
            retry_after_fallback_secs: env_or(
                "RETRY_AFTER_FALLBACK_SECS",
                defaults.retry_after_fallback_secs,
            ),
            request_timeout: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
        }
        .sanitized()
    }

    /// Clamps the sweep interval to at least one second and the default TTL
    /// to at most [`MAX_TTL`].
    pub fn sanitized(mut self) -> Self {
        if self.sweep_interval < MIN_SWEEP_INTERVAL {
            warn!(
                "SWEEP_INTERVAL={} is too short, using {}s",
                self.sweep_interval, MIN_SWEEP_INTERVAL
            );
            self.sweep_interval = MIN_SWEEP_INTERVAL;
        }
        if self.default_ttl > MAX_TTL.as_secs() {
            warn!(
                "DEFAULT_TTL={} exceeds the maximum, using {}s",
                self.default_ttl,
                MAX_TTL.as_secs()
            );
            self.default_ttl = MAX_TTL.as_secs();
        }
        self
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Retry policy described by the `RETRY_*` settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry_max,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            fallback_retry_after: Duration::from_secs(self.retry_after_fallback_secs),
        }
    }
}

/// Parses `key` from the environment, falling back on absence or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            sweep_interval: 60,
            server_port: 3001,
            retry_max: 3,
            retry_base_delay_ms: 2000,
            retry_after_fallback_secs: 2,
            request_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.retry_max, 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_retry_policy() {
        let policy = Config::default().retry_policy();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(2000));
        assert_eq!(policy.fallback_retry_after, Duration::from_secs(2));
    }

    #[test]
    fn test_sanitized_clamps_out_of_range_values() {
        let config = Config {
            sweep_interval: 0,
            default_ttl: u64::MAX,
            ..Config::default()
        }
        .sanitized();

        assert_eq!(config.sweep_interval, 1);
        assert_eq!(config.default_ttl(), MAX_TTL);
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let config = Config {
            sweep_interval: 5,
            default_ttl: 0,
            ..Config::default()
        }
        .sanitized();

        assert_eq!(config.sweep_interval, 5);
        assert_eq!(config.default_ttl, 0);
    }

    #[test]
    fn test_env_or_ignores_unparseable_values() {
        env::set_var("METRICS_CACHE_TEST_BAD_NUMBER", "soon");
        assert_eq!(env_or("METRICS_CACHE_TEST_BAD_NUMBER", 7u64), 7);
        env::remove_var("METRICS_CACHE_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("METRICS_CACHE_TEST_PORT", "8080");
        assert_eq!(env_or("METRICS_CACHE_TEST_PORT", 3001u16), 8080);
        env::remove_var("METRICS_CACHE_TEST_PORT");
    }
}
