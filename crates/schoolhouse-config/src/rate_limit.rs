//! Rate limiting configuration for API endpoints.
//!
//! Configuration for rate limiting using the Governor crate. Limits are
//! keyed by peer IP and follow a token-bucket model: tokens replenish at
//! the configured per-second rate, and `burst_size` caps how many tokens
//! can accumulate.
//!
//! Environment variables:
//!
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: Requests per second for general endpoints (default: 2)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: Burst size for general endpoints (default: 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Requests per second for auth endpoints (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Burst size for auth endpoints (default: 5)

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Rate limit configuration for the API.
///
/// Auth endpoints get their own, stricter limits to slow brute-force
/// attempts on login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per second for general endpoints.
    #[allow(dead_code)]
    pub general_per_second: u64,

    /// Burst size for general endpoints.
    #[allow(dead_code)]
    pub general_burst_size: u32,

    /// Requests per second for auth endpoints (stricter).
    #[allow(dead_code)]
    pub auth_per_second: u64,

    /// Burst size for auth endpoints (stricter).
    #[allow(dead_code)]
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// Creates a new `RateLimitConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            general_per_second: std::env::var("RATE_LIMIT_GENERAL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            general_burst_size: std::env::var("RATE_LIMIT_GENERAL_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Creates a `GovernorConfig` for general API endpoints.
    ///
    /// The returned config uses the peer IP address as the rate limit key,
    /// meaning each IP address has its own rate limit bucket.
    ///
    /// # Panics
    ///
    /// Panics if the governor configuration cannot be built (should not happen
    /// with valid configuration values).
    #[allow(dead_code)]
    #[must_use]
    pub fn general_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.general_per_second)
            .burst_size(self.general_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build general rate limiter config")
    }

    /// Creates a `GovernorConfig` for authentication endpoints.
    ///
    /// Auth endpoints have stricter rate limits to prevent brute-force attacks.
    ///
    /// # Panics
    ///
    /// Panics if the governor configuration cannot be built.
    #[allow(dead_code)]
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_config_equality() {
        let config1 = RateLimitConfig::default();
        let config2 = RateLimitConfig::default();
        assert_eq!(config1, config2);
    }

    #[test]
    fn test_governor_configs_build() {
        let config = RateLimitConfig::default();
        let _general = config.general_governor_config();
        let _auth = config.auth_governor_config();
    }
}
