//! URL handling module for getver
//!
//! This module provides root-URL normalization, host canonicalization and the
//! same-site filter that keeps a crawl on the site it started from.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{authority, same_domain, to_domain};
pub use normalize::{default_scheme, normalize_root};

/// How strictly discovered links must match the crawl root's host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlScope {
    /// Compare the last two labels (`docs.example.com` -> `example.com`)
    #[default]
    Domain,
    /// Compare the last three labels (`a.docs.example.com` -> `docs.example.com`)
    Subdomain,
}

impl CrawlScope {
    /// Picks the scope from the `same-subdomain` setting
    pub fn from_same_subdomain(same_subdomain: bool) -> Self {
        if same_subdomain {
            Self::Subdomain
        } else {
            Self::Domain
        }
    }

    /// Number of trailing host labels that make up the canonical form
    pub fn label_count(&self) -> usize {
        match self {
            Self::Domain => 2,
            Self::Subdomain => 3,
        }
    }
}
