//! Breadth-first crawl frontier
//!
//! This module handles:
//! - The FIFO queue of URLs waiting to be fetched
//! - The visited set that guarantees each URL is enqueued (and so fetched)
//!   at most once per run
//! - Filtering discovered hrefs down to same-site, non-edit links

use crate::url::{is_edit_action, resolve_site_relative};
use crate::UrlError;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// What happened to an href offered to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Appended to the tail of the queue
    Enqueued,

    /// Already seen this run (queued, fetched, or seeded)
    AlreadyVisited,

    /// Points at a wiki edit view
    EditAction,

    /// External, protocol-relative, fragment-only or otherwise not site-relative
    NotSiteRelative,
}

impl OfferOutcome {
    pub fn is_enqueued(&self) -> bool {
        matches!(self, Self::Enqueued)
    }
}

/// FIFO queue plus visited set
///
/// A URL joins the visited set when it is enqueued and never leaves it, so
/// two sightings of the same link before either is fetched still produce a
/// single queue entry.
#[derive(Debug)]
pub struct Frontier {
    base: Url,
    queue: VecDeque<Url>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier resolving links against `base`
    pub fn new(base: Url) -> Self {
        Self {
            base,
            queue: VecDeque::new(),
            visited: HashSet::new(),
        }
    }

    /// Enqueues the seed paths in order, marking each visited
    ///
    /// Returns the number of seeds actually enqueued (duplicates collapse).
    pub fn seed<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<usize, UrlError> {
        let mut enqueued = 0;
        for path in paths {
            let url = resolve_site_relative(path.as_ref(), &self.base)?;
            if self.visited.insert(url.as_str().to_string()) {
                tracing::trace!("Seeded {}", url);
                self.queue.push_back(url);
                enqueued += 1;
            }
        }
        Ok(enqueued)
    }

    /// Removes and returns the earliest-enqueued URL
    pub fn pop(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Offers a raw href discovered on a page
    ///
    /// The href is resolved against the base origin; edit links, links that
    /// are not site-relative and already visited URLs are dropped.
    pub fn offer(&mut self, href: &str) -> OfferOutcome {
        let url = match resolve_site_relative(href, &self.base) {
            Ok(url) => url,
            Err(_) => return OfferOutcome::NotSiteRelative,
        };

        if is_edit_action(&url) {
            tracing::trace!("Dropping edit link {}", url);
            return OfferOutcome::EditAction;
        }

        if !self.visited.insert(url.as_str().to_string()) {
            return OfferOutcome::AlreadyVisited;
        }

        tracing::trace!("Enqueued {}", url);
        self.queue.push_back(url);
        OfferOutcome::Enqueued
    }

    /// Returns true if the URL has ever been seeded or enqueued
    pub fn has_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of URLs waiting to be fetched
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs seen this run
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// The pending URLs in pop order
    pub fn pending(&self) -> impl Iterator<Item = &Url> {
        self.queue.iter()
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier() -> Frontier {
        Frontier::new(Url::parse("https://wiki.osdev.org").unwrap())
    }

    fn drain(frontier: &mut Frontier) -> Vec<String> {
        std::iter::from_fn(|| frontier.pop())
            .map(|url| url.path().to_string())
            .collect()
    }

    #[test]
    fn test_new_frontier_is_empty() {
        let mut frontier = frontier();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_seed_marks_visited() {
        let mut frontier = frontier();
        let count = frontier.seed(&["/Main_Page", "/Category:x86-64"]).unwrap();

        assert_eq!(count, 2);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.offer("/Main_Page"), OfferOutcome::AlreadyVisited);
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_duplicate_seeds_collapse() {
        let mut frontier = frontier();
        let count = frontier.seed(&["/Main_Page", "/Main_Page"]).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_invalid_seed_is_an_error() {
        let mut frontier = frontier();
        assert!(frontier.seed(&["Main_Page"]).is_err());
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut frontier = frontier();
        frontier.seed(&["/A"]).unwrap();
        frontier.offer("/B");
        frontier.offer("/C");

        assert_eq!(drain(&mut frontier), vec!["/A", "/B", "/C"]);
    }

    #[test]
    fn test_offer_dedups_before_fetch() {
        let mut frontier = frontier();
        assert_eq!(frontier.offer("/Paging"), OfferOutcome::Enqueued);
        assert_eq!(frontier.offer("/Paging"), OfferOutcome::AlreadyVisited);
        assert_eq!(frontier.offer("/Paging#Example"), OfferOutcome::AlreadyVisited);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_popped_url_is_never_reenqueued() {
        let mut frontier = frontier();
        frontier.offer("/Paging");
        let popped = frontier.pop().unwrap();

        assert!(frontier.has_visited(&popped));
        assert_eq!(frontier.offer("/Paging"), OfferOutcome::AlreadyVisited);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_offer_rejects_edit_links() {
        let mut frontier = frontier();
        assert_eq!(
            frontier.offer("/index.php?title=Paging&action=edit"),
            OfferOutcome::EditAction
        );
        assert!(frontier.is_empty());
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_offer_rejects_non_site_relative() {
        let mut frontier = frontier();
        for href in [
            "https://example.com/",
            "//example.com/page",
            "#section",
            "Paging",
            "mailto:someone@example.com",
        ] {
            assert_eq!(frontier.offer(href), OfferOutcome::NotSiteRelative, "{}", href);
        }
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_pending_in_pop_order() {
        let mut frontier = frontier();
        frontier.seed(&["/A", "/B"]).unwrap();
        let pending: Vec<&str> = frontier.pending().map(|u| u.path()).collect();
        assert_eq!(pending, vec!["/A", "/B"]);
    }
}
