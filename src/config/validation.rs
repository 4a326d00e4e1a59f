use crate::config::types::{CandidateConfig, Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;

/// Deepest crawl the tool agrees to run
pub const MAX_CRAWL_DEPTH: u32 = 3;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_candidate_config(&config.candidates)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.depth > MAX_CRAWL_DEPTH {
        return Err(ConfigError::Validation(format!(
            "Maximum crawl depth is {}, got {}",
            MAX_CRAWL_DEPTH, config.depth
        )));
    }

    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "timeout_ms must be >= 1ms".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates candidate harvesting configuration
fn validate_candidate_config(config: &CandidateConfig) -> Result<(), ConfigError> {
    if config.max_collected_words < 1 {
        return Err(ConfigError::Validation(
            "max_collected_words must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.max_results < 1 {
        return Err(ConfigError::Validation(
            "max_results must be >= 1".to_string(),
        ));
    }

    Ok(())
}
