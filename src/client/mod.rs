//! PokeAPI Client
//!
//! Cache-aside HTTP access to PokeAPI. Every fetch consults the shared
//! [`TtlCache`] first and only goes to the network on a miss.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// HTTP client for the PokeAPI endpoints used by the REPL.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<TtlCache>,
}

impl PokeApiClient {
    /// Creates a client rooted at `base_url` that stores responses in `cache`.
    pub fn new(base_url: impl Into<String>, cache: Arc<TtlCache>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config, cache: Arc<TtlCache>) -> Result<Self> {
        Self::new(config.api_base_url.clone(), cache, config.http_timeout())
    }

    /// URL of the first page of the location area listing.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    // == Fetch ==
    /// Returns the raw body for `url`, from cache when possible.
    ///
    /// Only successful (2xx) bodies are cached; other statuses are reported
    /// as [`PokedexError::Status`].
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }
        debug!(url, "Cache miss, fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches one page of location areas from a full page URL.
    pub async fn location_area_page(&self, url: &str) -> Result<LocationAreaPage> {
        self.fetch_json(url).await
    }

    /// Fetches a single location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    /// Fetches a pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.fetch_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(5)).unwrap());
        let client =
            PokeApiClient::new("http://localhost/api/v2/", cache.clone(), Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            client.location_areas_url(),
            "http://localhost/api/v2/location-area/"
        );
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_fetch_served_from_cache_without_network() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(5)).unwrap());
        // Nothing listens here, so only a cache hit can succeed
        let client =
            PokeApiClient::new("http://127.0.0.1:9", cache.clone(), Duration::from_secs(1))
                .unwrap();
        cache.add("http://127.0.0.1:9/pokemon/ditto", br#"{"name":"ditto"}"#.to_vec());

        let body = client.fetch("http://127.0.0.1:9/pokemon/ditto").await.unwrap();

        assert_eq!(body, br#"{"name":"ditto"}"#.to_vec());
        assert_eq!(cache.stats().hits, 1);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_decode_error_surfaces() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(5)).unwrap());
        let client =
            PokeApiClient::new("http://127.0.0.1:9", cache.clone(), Duration::from_secs(1))
                .unwrap();
        cache.add("http://127.0.0.1:9/pokemon/bad", b"not json".to_vec());

        let result = client.pokemon("bad").await;

        assert!(matches!(result, Err(PokedexError::Decode(_))));
        cache.shutdown().await;
    }
}
