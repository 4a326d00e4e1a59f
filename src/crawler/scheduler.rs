//! Scheduler for the crawl frontier and the concurrency cap
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be fetched
//! - Skipping URLs that were already crawled with at least as much depth left
//! - Global concurrency limiting via a semaphore

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A URL queued for fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The absolute URL to fetch
    pub url: String,

    /// Remaining crawl depth when this URL is fetched (always >= 1)
    pub depth: u32,
}

/// Scheduler manages the frontier queue and the number of fetches in flight
///
/// A URL is queued again only when it is reached with more depth left than
/// any earlier visit, since only then can its links lead further than
/// before. Depth-0 URLs are never queued.
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Arc<Semaphore>,

    /// URLs waiting to be fetched, in discovery order
    frontier: VecDeque<QueuedUrl>,

    /// Highest depth each URL has been queued with
    claimed: HashMap<String, u32>,
}

impl Scheduler {
    /// Creates a scheduler allowing `max_concurrent` fetches at a time
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            frontier: VecDeque::new(),
            claimed: HashMap::new(),
        }
    }

    /// Adds a URL to the frontier
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued
    /// * `false` - Depth is 0, or the URL was already queued with at least this depth
    pub fn enqueue(&mut self, url: String, depth: u32) -> bool {
        if depth == 0 {
            return false;
        }

        match self.claimed.get(&url) {
            Some(&previous) if previous >= depth => return false,
            _ => {}
        }

        self.claimed.insert(url.clone(), depth);
        self.frontier.push_back(QueuedUrl { url, depth });
        true
    }

    /// Takes the next URL from the frontier
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        self.frontier.pop_front()
    }

    /// Waits for a free fetch slot
    ///
    /// The permit must be held for the duration of the fetch; dropping it
    /// frees the slot. Returns `None` only if the semaphore was closed.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.semaphore).acquire_owned().await.ok()
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Returns the number of fetch slots currently free
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scheduler() {
        let scheduler = Scheduler::new(4);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.frontier_size(), 0);
        assert_eq!(scheduler.available_slots(), 4);
    }

    #[test]
    fn test_zero_concurrency_still_allows_one_fetch() {
        let scheduler = Scheduler::new(0);
        assert_eq!(scheduler.available_slots(), 1);
    }

    #[test]
    fn test_enqueue_and_pop_in_order() {
        let mut scheduler = Scheduler::new(4);
        assert!(scheduler.enqueue("http://example.com/a".to_string(), 2));
        assert!(scheduler.enqueue("http://example.com/b".to_string(), 1));

        assert_eq!(
            scheduler.pop(),
            Some(QueuedUrl {
                url: "http://example.com/a".to_string(),
                depth: 2
            })
        );
        assert_eq!(scheduler.pop().map(|q| q.depth), Some(1));
        assert_eq!(scheduler.pop(), None);
    }

    #[test]
    fn test_depth_zero_is_terminal() {
        let mut scheduler = Scheduler::new(4);
        assert!(!scheduler.enqueue("http://example.com/".to_string(), 0));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_duplicate_with_same_or_less_depth_is_skipped() {
        let mut scheduler = Scheduler::new(4);
        assert!(scheduler.enqueue("http://example.com/a".to_string(), 2));
        assert!(!scheduler.enqueue("http://example.com/a".to_string(), 2));
        assert!(!scheduler.enqueue("http://example.com/a".to_string(), 1));
        assert_eq!(scheduler.frontier_size(), 1);
    }

    #[test]
    fn test_duplicate_with_more_depth_is_requeued() {
        let mut scheduler = Scheduler::new(4);
        assert!(scheduler.enqueue("http://example.com/a".to_string(), 1));
        assert!(scheduler.enqueue("http://example.com/a".to_string(), 3));
        assert_eq!(scheduler.frontier_size(), 2);
    }

    #[tokio::test]
    async fn test_acquire_limits_slots() {
        let scheduler = Scheduler::new(2);

        let first = scheduler.acquire().await;
        let second = scheduler.acquire().await;
        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(scheduler.available_slots(), 0);

        drop(first);
        assert_eq!(scheduler.available_slots(), 1);
    }
}
