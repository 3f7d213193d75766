//! HTTP client for books.toscrape.com using wreq.

use crate::books::error::ScrapeError;
use crate::books::{normalize_base_url, CATALOGUE_PATH};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Source of raw book and index pages - enables mocking for tests.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetches a book page by its path relative to the catalogue.
    async fn book_page(&self, path: &str) -> Result<String, ScrapeError>;

    /// Fetches the site root, which carries the category sidebar.
    async fn index_page(&self) -> Result<String, ScrapeError>;

    /// Site root the pages are fetched from, ending in '/'.
    fn base_url(&self) -> &str;
}

/// Plain GET client. One request per call, no retries.
pub struct BooksClient {
    client: Client,
    base_url: String,
}

impl BooksClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: normalize_base_url(&config.base_url) })
    }

    /// Root under which book pages live.
    pub fn catalogue_url(&self) -> String {
        format!("{}{}", self.base_url, CATALOGUE_PATH)
    }

    async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| ScrapeError::Network { url: url.to_string(), message: e.to_string() })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::Status { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            message: format!("Failed to read response body: {}", e),
        })
    }
}

#[async_trait]
impl BookSource for BooksClient {
    async fn book_page(&self, path: &str) -> Result<String, ScrapeError> {
        let url = format!("{}{}", self.catalogue_url(), path.trim_start_matches('/'));

        info!("Fetching book: {}", path);
        self.get(&url).await
    }

    async fn index_page(&self) -> Result<String, ScrapeError> {
        info!("Fetching category index");
        self.get(&self.base_url).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
