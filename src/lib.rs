//! getver: find the likely version number of a piece of software, given its website
//!
//! This crate crawls a site (same domain or subdomain) up to a bounded depth,
//! harvests version-like tokens from the page text and ranks them so that the
//! most likely version string comes first.

pub mod candidates;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use std::sync::Arc;
use thiserror::Error;

use crate::candidates::{rank, CandidateCollector, Tokenizer};
use crate::crawler::{crawl_domain, CrawlContext};

/// Main error type for getver operations
#[derive(Debug, Error)]
pub enum GetverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Not enough results to retrieve result number {requested}.")]
    NotEnoughResults { requested: usize, available: usize },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for getver operations
pub type Result<T> = std::result::Result<T, GetverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use candidates::{CandidateRecord, ClassifierOptions};
pub use config::Config;
pub use url::{normalize_root, same_domain, to_domain, CrawlScope};

/// Crawls `root` and returns the ranked list of likely version numbers
///
/// The crawl depth, request timeout, concurrency cap and classifier options
/// come from `config`; at most `config.output.max_results` words are returned,
/// best candidate first. Sorting and single-result selection are applied
/// afterwards by [`output::postprocess`].
///
/// # Example
///
/// ```no_run
/// use getver::{find_version_candidates, Config};
///
/// # async fn example() -> getver::Result<()> {
/// let config = Config::default();
/// let versions = find_version_candidates("https://golang.org", &config).await?;
/// println!("{:?}", versions.first());
/// # Ok(())
/// # }
/// ```
pub async fn find_version_candidates(root: &str, config: &Config) -> Result<Vec<String>> {
    let root = normalize_root(root)?;
    let depth = config.crawler.depth;

    let collector = Arc::new(CandidateCollector::new(
        config.candidates.max_collected_words,
    ));
    let tokenizer = Arc::new(Tokenizer::new(
        ClassifierOptions::from(&config.candidates),
        config.candidates.look_inside_tags,
    ));

    let context = CrawlContext::new(&root, &config.crawler)?;
    let examine_collector = Arc::clone(&collector);
    crawl_domain(context, &root, depth, move |url, body, current_depth| {
        tracing::debug!("Examining {} ({} bytes, depth {})", url, body.len(), current_depth);
        tokenizer.harvest(body, current_depth, &examine_collector);
    })
    .await;

    let candidates = collector.drain();
    tracing::info!("Collected {} candidate words", candidates.len());

    Ok(rank(&candidates, config.output.max_results))
}
