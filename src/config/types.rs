use serde::Deserialize;

/// Main configuration structure for getver
///
/// Every section and field has a default, so an empty TOML file (or no file
/// at all) yields the same behavior as running `getver URL` without flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub candidates: CandidateConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Crawl depth: 1 only examines the root page, 2 adds its sub pages, etc.
    pub depth: u32,

    /// Timeout per request (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Confine the crawl to the root's subdomain instead of its domain
    #[serde(rename = "same-subdomain")]
    pub same_subdomain: bool,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            timeout_ms: 10_000,
            max_concurrent_fetches: 16,
            same_subdomain: false,
            user_agent: format!("getver/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Candidate harvesting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Keep letters in accepted words instead of stripping them
    #[serde(rename = "keep-letters")]
    pub keep_letters: bool,

    /// Stop collecting once this many distinct words are stored
    #[serde(rename = "max-collected-words")]
    pub max_collected_words: usize,

    /// Also collect words found inside HTML tags
    #[serde(rename = "look-inside-tags")]
    pub look_inside_tags: bool,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            keep_letters: false,
            max_collected_words: 2048,
            look_inside_tags: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of ranked results to produce
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Sort the results in descending order
    pub sort: bool,

    /// Number the printed results
    pub numbered: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_results: 1,
            sort: false,
            numbered: false,
        }
    }
}
