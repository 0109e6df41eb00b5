//! Explorer Configuration

use std::time::Duration;
use thiserror::Error;

use crate::cache::MAX_TTL;

/// Default PokeAPI root
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache TTL must be greater than zero")]
    ZeroTtl,

    #[error("cache TTL must not exceed {0:?}")]
    TtlTooLarge(Duration),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("API base URL must not be empty")]
    EmptyBaseUrl,
}

/// Explorer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API root, without trailing slash
    pub api_base_url: String,

    /// How long a fetched response stays cached
    pub cache_ttl: Duration,

    /// Catch difficulty offset; a roll below this value catches
    pub catch_threshold: u32,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(5 * 60),
            catch_threshold: 50,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Set the API root
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the catch threshold
    pub fn with_catch_threshold(mut self, threshold: u32) -> Self {
        self.catch_threshold = threshold;
        self
    }

    /// Set the HTTP timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        if self.cache_ttl > MAX_TTL {
            return Err(ConfigError::TtlTooLarge(MAX_TTL));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.api_base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.catch_threshold, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_api_base_url("http://localhost:8080/api/v2/")
            .with_cache_ttl(Duration::from_secs(30))
            .with_catch_threshold(10)
            .with_request_timeout(Duration::from_secs(2));

        assert_eq!(config.api_base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.catch_threshold, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config::default().with_cache_ttl(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTtl));
    }

    #[test]
    fn test_validate_rejects_oversized_ttl() {
        let config = Config::default().with_cache_ttl(Duration::from_secs(u64::MAX));
        assert_eq!(config.validate(), Err(ConfigError::TtlTooLarge(MAX_TTL)));

        let config = Config::default().with_cache_ttl(MAX_TTL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config::default().with_request_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = Config::default().with_api_base_url("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyBaseUrl));
    }
}
