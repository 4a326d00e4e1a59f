//! Crawler module for fetching and traversing a site
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching that never fails past its boundary
//! - Link extraction and page classification
//! - Frontier scheduling with a concurrency cap
//! - Overall crawl coordination with per-run visited state

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{crawl_domain, crawl_one_page, CrawlContext};
pub use fetcher::{build_http_client, Fetcher};
pub use parser::{link_is_page, LinkExtractor};
pub use scheduler::{QueuedUrl, Scheduler};
