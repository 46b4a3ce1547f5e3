//! IMEC Hub search API client.
//!
//! Performs `/search` requests and normalizes the payload into records.

use crate::config::Config;
use crate::error::{SearchError, validate_query};
use crate::hub::models::{Category, SearchResultItem, normalize_items};
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Hub search API client.
///
/// Every call performs a fresh request; nothing is cached.
#[derive(Debug, Clone)]
pub struct HubClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Record types requested from the backend, empty for all
    categories: Vec<Category>,
}

impl HubClient {
    /// Create a new hub client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<HubClient>` - New client or error
    ///
    /// # Details
    /// Applies `request_timeout_secs` when set; otherwise requests never time out.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Self::with_http_client(client, &config.api_base, config.categories.clone())
    }

    fn with_http_client(client: Client, api_base: &str, categories: Vec<Category>) -> Result<Self> {
        let base_url = api_base.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!(
                "API base URL is empty. Set `api_base` in config.jsonc or IMEC_API_BASE"
            ));
        }

        Ok(Self {
            client,
            base_url,
            categories,
        })
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Search the hub for a keyword.
    ///
    /// # Arguments
    /// * `query` - Raw user query; trimmed before sending
    ///
    /// # Returns
    /// * `Result<Vec<SearchResultItem>, SearchError>` - Records or error
    ///
    /// # Details
    /// A blank query fails with `SearchError::EmptyQuery` without any request.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        let query = validate_query(query)?;
        self.fetch_items(Some(query)).await
    }

    /// Fetch the unfiltered `/search` result set.
    ///
    /// # Details
    /// Sends no `q` parameter; what the backend returns is its own default set.
    pub async fn fetch_initial(&self) -> Result<Vec<SearchResultItem>, SearchError> {
        self.fetch_items(None).await
    }

    async fn fetch_items(&self, query: Option<&str>) -> Result<Vec<SearchResultItem>, SearchError> {
        let url = self.search_url();

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = query {
            params.push(("q", q));
        }
        for category in &self.categories {
            params.push(("type", category.filter_param()));
        }

        debug!(%url, ?query, "requesting search results");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, body = %error_text, "search request failed");
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        let items = normalize_items(payload)?;

        info!(count = items.len(), ?query, "search results received");
        Ok(items)
    }
}
