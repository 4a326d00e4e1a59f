//! HTTP fetcher implementation
//!
//! This is the crawler's only contact with the network. A fetch either yields
//! the page body or an empty string; no error ever escapes this module, so a
//! broken page only ends its own branch of the crawl.

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with the configured user agent and timeout
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use getver::config::CrawlerConfig;
/// use getver::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches page bodies, turning every failure into an empty body
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// Fetches `url` and returns its body
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx response | body text |
    /// | Non-2xx response | empty |
    /// | Timeout, connection or TLS error | empty |
    /// | Body read error | empty |
    pub async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Request timeout for {}", url);
                } else {
                    tracing::debug!("Request failed for {}: {}", url, e);
                }
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status.as_u16(), url);
            return String::new();
        }

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                String::new()
            }
        }
    }
}
