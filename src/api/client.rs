//! PokeAPI HTTP client
//!
//! Every GET is keyed by its URL in the response cache: the cache is consulted
//! before a request and filled after a successful one.

use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationArea, LocationAreaPage, Pokemon};
use crate::cache::TtlCache;
use crate::config::Config;

/// Errors that can occur when talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Failed to parse JSON response
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Caching client for the PokeAPI
#[derive(Debug)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: TtlCache,
}

impl PokeApiClient {
    /// Build a client for `config`, memoizing responses in `cache`
    pub fn new(config: &Config, cache: TtlCache) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub async fn shutdown(self) {
        self.cache.shutdown().await;
    }

    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name.to_lowercase())
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name.to_lowercase())
    }

    /// Fetch a response body, serving it from the cache when still fresh
    pub async fn fetch(&self, url: &str) -> Result<Bytes, ApiError> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a page of location areas; `None` means the first page
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage, ApiError> {
        match page_url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.first_location_page_url()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        self.fetch_json(&self.pokemon_url(name)).await
    }
}
