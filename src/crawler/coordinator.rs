//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The per-run crawl context (fetcher, link extractor, visited set)
//! - Fetching one page and selecting its same-site sub pages
//! - Fanning out over the frontier with a bounded number of tasks
//! - Joining every task before the crawl returns

use crate::config::CrawlerConfig;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::Fetcher;
use crate::url::{default_scheme, same_domain, CrawlScope};
use crate::GetverError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use url::Url;

/// State shared by every task of one crawl run
///
/// A fresh context is created for every run, so repeated or concurrent
/// crawls never see each other's visited pages.
pub struct CrawlContext {
    fetcher: Fetcher,
    extractor: LinkExtractor,
    scope: CrawlScope,
    max_concurrent: usize,

    /// URLs already handed to the examine callback
    examined: Mutex<HashSet<String>>,
}

impl CrawlContext {
    /// Creates the context for crawling from `root`
    ///
    /// # Arguments
    ///
    /// * `root` - The normalized crawl root; its scheme decides the default
    ///   scheme for protocol-relative links
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlContext)` - Ready to crawl
    /// * `Err(GetverError)` - The HTTP client could not be built
    pub fn new(root: &Url, config: &CrawlerConfig) -> Result<Self, GetverError> {
        Ok(Self::with_fetcher(
            Fetcher::from_config(config)?,
            default_scheme(root),
            CrawlScope::from_same_subdomain(config.same_subdomain),
            config.max_concurrent_fetches as usize,
        )?)
    }

    /// Creates a context around an existing fetcher
    pub fn with_fetcher(
        fetcher: Fetcher,
        default_scheme: &str,
        scope: CrawlScope,
        max_concurrent: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            fetcher,
            extractor: LinkExtractor::new(default_scheme)?,
            scope,
            max_concurrent,
            examined: Mutex::new(HashSet::new()),
        })
    }

    /// Marks `url` as examined
    ///
    /// Check and insertion happen under one lock, so exactly one caller gets
    /// `true` for any URL.
    pub fn mark_examined(&self, url: &str) -> bool {
        self.examined
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string())
    }

    /// Returns the number of pages handed to the examine callback so far
    pub fn examined_count(&self) -> usize {
        self.examined
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Crawls a single page
///
/// This function:
/// 1. Parses `url`; an invalid URL ends this branch with no links
/// 2. Fetches the body (empty on any failure)
/// 3. Runs `on_examine(url, body, depth)` if no other task examined `url` yet
/// 4. Returns the same-site links that look like pages
pub async fn crawl_one_page<F>(
    context: &CrawlContext,
    url: &str,
    depth: u32,
    on_examine: &F,
) -> Vec<String>
where
    F: Fn(&str, &str, u32) + ?Sized,
{
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Invalid url {}: {}", url, e);
            return Vec::new();
        }
    };

    let body = context.fetcher.fetch(url).await;

    if context.mark_examined(url) {
        on_examine(url, &body, depth);
    } else {
        tracing::trace!("Already examined {}", url);
    }

    let sub_pages = context.extractor.sub_pages(&body);
    same_domain(&sub_pages, &parsed, context.scope)
}

/// Crawls `root` up to `depth` levels and examines every page once
///
/// Depth 1 only examines the root, depth 2 also examines the pages it links
/// to, and so on; depth 0 fetches nothing. Links found on a page crawled with
/// depth `d` are crawled with depth `d - 1`. At most the configured number of
/// fetches run at once, and the function returns only after every spawned
/// task has finished. Invalid URLs and failed fetches end their own branch
/// without affecting the rest of the crawl.
///
/// # Returns
///
/// The number of distinct pages examined
///
/// # Example
///
/// ```no_run
/// use getver::config::CrawlerConfig;
/// use getver::crawler::{crawl_domain, CrawlContext};
/// use getver::url::normalize_root;
///
/// # async fn example() -> getver::Result<()> {
/// let root = normalize_root("example.com")?;
/// let context = CrawlContext::new(&root, &CrawlerConfig::default())?;
/// crawl_domain(context, &root, 2, |url, body, depth| {
///     println!("{} ({} bytes, depth {})", url, body.len(), depth);
/// })
/// .await;
/// # Ok(())
/// # }
/// ```
pub async fn crawl_domain<F>(context: CrawlContext, root: &Url, depth: u32, on_examine: F) -> usize
where
    F: Fn(&str, &str, u32) + Send + Sync + 'static,
{
    let start_time = std::time::Instant::now();
    let context = Arc::new(context);
    let on_examine = Arc::new(on_examine);

    let mut scheduler = Scheduler::new(context.max_concurrent);
    let mut tasks: JoinSet<(u32, Vec<String>)> = JoinSet::new();
    let mut pages_crawled = 0usize;

    tracing::info!("Starting crawl of {} with depth {}", root, depth);
    scheduler.enqueue(root.to_string(), depth);

    loop {
        while let Some(queued) = scheduler.pop() {
            let Some(permit) = scheduler.acquire().await else {
                tracing::warn!("Fetch slots closed, dropping {}", queued.url);
                continue;
            };

            let context = Arc::clone(&context);
            let on_examine = Arc::clone(&on_examine);
            tasks.spawn(async move {
                let _permit = permit;
                let links =
                    crawl_one_page(&context, &queued.url, queued.depth, on_examine.as_ref()).await;
                (queued.depth, links)
            });
        }

        match tasks.join_next().await {
            None => break,
            Some(Ok((depth, links))) => {
                pages_crawled += 1;
                let queued = links
                    .into_iter()
                    .filter(|link| scheduler.enqueue(link.clone(), depth - 1))
                    .count();
                tracing::debug!(
                    "Queued {} links at depth {}, {} in frontier",
                    queued,
                    depth - 1,
                    scheduler.frontier_size()
                );
            }
            Some(Err(e)) => {
                tracing::warn!("Crawl task failed: {}", e);
            }
        }
    }

    let examined = context.examined_count();
    tracing::info!(
        "Crawl completed: {} fetches, {} pages examined in {:?}",
        pages_crawled,
        examined,
        start_time.elapsed()
    );

    examined
}
