//! Streaming Availability API HTTP client

use crate::error::{Result, StreamingError};
use crate::types::{SearchResponse, Show, Timeframe};
use std::time::Duration;
use tracing::debug;

/// Client for the Streaming Availability API
///
/// Every request carries the RapidAPI key and host headers. Searches are
/// pinned to the US market, series only, 20 results.
pub struct StreamingClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl StreamingClient {
    /// Base URL of the RapidAPI-hosted API
    pub const DEFAULT_BASE_URL: &'static str = "https://streaming-availability.p.rapidapi.com";
    /// Value of the `X-RapidAPI-Host` header
    pub const API_HOST: &'static str = "streaming-availability.p.rapidapi.com";
    /// Market all searches are run against
    pub const COUNTRY: &'static str = "us";
    /// Only TV series are requested
    pub const SHOW_TYPE: &'static str = "series";
    /// Maximum number of shows returned per search
    pub const RESULT_LIMIT: usize = 20;

    /// Create a new client with default settings (30 second timeout)
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom base URL
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        Self::with_timeout(api_key, base_url, Duration::from_secs(30))
    }

    /// Create a new client with a custom base URL and timeout
    pub fn with_timeout(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the filter-search URL for a catalog and popularity window
    pub fn search_url(&self, platform: &str, timeframe: Timeframe) -> String {
        format!(
            "{}/shows/search/filters?country={}&catalogs={}&show_type={}&order_by={}&limit={}&output_language=en",
            self.base_url,
            Self::COUNTRY,
            urlencoding::encode(platform),
            Self::SHOW_TYPE,
            timeframe.order_by(),
            Self::RESULT_LIMIT
        )
    }

    /// Fetch the most popular series of a streaming catalog
    ///
    /// # Arguments
    /// * `platform` - Catalog identifier (e.g. "netflix", "prime", "hbo")
    /// * `timeframe` - Popularity window the results are ranked by
    pub async fn top_shows(&self, platform: &str, timeframe: Timeframe) -> Result<Vec<Show>> {
        let url = self.search_url(platform, timeframe);
        debug!(url = %url, platform, timeframe = %timeframe, "Searching shows");

        let response = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", Self::API_HOST)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StreamingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let data: SearchResponse = serde_json::from_str(&body)?;

        let mut shows = data.shows;
        shows.truncate(Self::RESULT_LIMIT);

        debug!(platform, timeframe = %timeframe, count = shows.len(), "Fetched shows");
        Ok(shows)
    }
}
