//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_MS;

/// Default PokeAPI root, without a trailing slash
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in milliseconds, also the reaper sweep period
    pub cache_ttl_ms: u64,
    /// PokeAPI base URL
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
    /// Upper bound (exclusive) of the catch roll
    pub catch_difficulty: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Cache TTL in milliseconds (default: 5000)
    /// - `POKEAPI_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    /// - `CATCH_DIFFICULTY` - Catch roll upper bound (default: 400)
    ///
    /// Unparseable values fall back to the default. A zero TTL is passed
    /// through and rejected when the cache is built.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.http_timeout_secs),
            catch_difficulty: parse_var("CATCH_DIFFICULTY")
                .filter(|d| *d > 0)
                .unwrap_or(defaults.catch_difficulty),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_ms: DEFAULT_TTL_MS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 10,
            catch_difficulty: 400,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_ms, 5000);
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.catch_difficulty, 400);
    }

    // Single test touching the environment so parallel tests cannot race on it
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_TTL_MS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("HTTP_TIMEOUT_SECS");
        env::remove_var("CATCH_DIFFICULTY");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl_ms, 5000);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.catch_difficulty, 400);

        env::set_var("CACHE_TTL_MS", "250");
        env::set_var("POKEAPI_BASE_URL", "http://localhost:8080/api/v2/");
        env::set_var("HTTP_TIMEOUT_SECS", "not-a-number");
        env::set_var("CATCH_DIFFICULTY", "0");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl(), Duration::from_millis(250));
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.catch_difficulty, 400);

        env::remove_var("CACHE_TTL_MS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("HTTP_TIMEOUT_SECS");
        env::remove_var("CATCH_DIFFICULTY");
    }
}
