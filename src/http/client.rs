//! Search API client
//!
//! Performs exactly one signed round-trip per call:
//! - Builds the query (`q`, optional `count`, `max_id` once the cursor moved)
//! - Signs it with the authenticator, if any
//! - Classifies non-success statuses and malformed bodies as errors
//!
//! Retrying is left to the caller.

use crate::auth::Authenticator;
use crate::config::{DEFAULT_API_URL, SEARCH_PATH};
use crate::error::{Error, Result};
use crate::pagination::Cursor;
use crate::types::{Page, Record};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A source of paginated records
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page of records matching `query` that are not newer than `before`
    async fn fetch_page(&self, query: &str, before: Cursor) -> Result<Page>;
}

/// Configuration for the search client
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Path of the search endpoint
    pub search_path: String,
    /// Request timeout
    pub timeout: Duration,
    /// Records requested per page (`count`), endpoint default when unset
    pub page_size: Option<u32>,
    /// User agent string
    pub user_agent: String,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            search_path: SEARCH_PATH.to_string(),
            timeout: Duration::from_secs(30),
            page_size: Some(100),
            user_agent: format!("tweet-archive/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchClientConfig {
    /// Create a new config builder
    pub fn builder() -> SearchClientConfigBuilder {
        SearchClientConfigBuilder::default()
    }
}

/// Builder for search client config
#[derive(Default)]
pub struct SearchClientConfigBuilder {
    config: SearchClientConfig,
}

impl SearchClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the search endpoint path
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.config.search_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: Option<u32>) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SearchClientConfig {
        self.config
    }
}

/// Body of a search response; everything but `statuses` is ignored
#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<Record>,
}

/// HTTP client for the search endpoint
pub struct SearchClient {
    client: Client,
    config: SearchClientConfig,
    endpoint: Url,
    authenticator: Option<Authenticator>,
}

impl SearchClient {
    /// Create an unauthenticated client
    pub fn new(config: SearchClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let endpoint = build_endpoint(&config.base_url, &config.search_path)?;

        Ok(Self {
            client,
            config,
            endpoint,
            authenticator: None,
        })
    }

    /// Create a client that signs every request
    pub fn with_auth(config: SearchClientConfig, authenticator: Authenticator) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.authenticator = Some(authenticator);
        Ok(client)
    }

    /// Resolved search endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Query parameters for one page request
    pub fn query_params(&self, query: &str, before: Cursor) -> Vec<(String, String)> {
        let mut params = vec![("q".to_string(), query.to_string())];
        if let Some(count) = self.config.page_size {
            params.push(("count".to_string(), count.to_string()));
        }
        if let Some(max_id) = before.value() {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        params
    }
}

#[async_trait]
impl PageSource for SearchClient {
    async fn fetch_page(&self, query: &str, before: Cursor) -> Result<Page> {
        let params = self.query_params(query, before);

        let mut req = self.client.get(self.endpoint.clone()).query(&params);
        if let Some(ref auth) = self.authenticator {
            req = auth.apply(req, &self.endpoint, &params)?;
        }

        debug!("GET {} before={}", self.endpoint, before);
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Malformed search response: {e}")))?;

        debug!("Received {} records", parsed.statuses.len());
        Ok(Page::new(parsed.statuses))
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}

/// Join base URL and path into the endpoint URL
fn build_endpoint(base_url: &str, path: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}
