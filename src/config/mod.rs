//! Configuration module for getver
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are applied on top of it by the
//! binary and the merged result is validated once more before crawling.
//!
//! # Example
//!
//! ```no_run
//! use getver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("getver.toml")).unwrap();
//! println!("Crawler will use depth: {}", config.crawler.depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CandidateConfig, Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_CRAWL_DEPTH};
