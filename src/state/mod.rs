//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the frontier, processed set, accumulated records and
//!   statistics of one run, owned by the coordinator
//! - `PageOutcome`: what happened to each fetched page
//! - `StopReason`: why the crawl loop ended

mod page_outcome;

pub use page_outcome::{PageOutcome, StopReason};

use crate::crawler::Frontier;
use crate::output::CrawlStatistics;
use crate::record::Record;
use std::collections::HashSet;
use url::Url;

/// All mutable state of a single crawl run
///
/// Only the coordinator's loop mutates it; nothing survives past the run.
#[derive(Debug)]
pub struct CrawlState {
    pub frontier: Frontier,
    processed: HashSet<String>,
    records: Vec<Record>,
    response_digests: HashSet<String>,
    max_records: usize,
    pub stats: CrawlStatistics,
}

impl CrawlState {
    pub fn new(frontier: Frontier, max_records: usize) -> Self {
        Self {
            frontier,
            processed: HashSet::new(),
            records: Vec::new(),
            response_digests: HashSet::new(),
            max_records,
            stats: CrawlStatistics::new(),
        }
    }

    /// Marks a URL as processed; returns false if it already was
    pub fn begin_processing(&mut self, url: &Url) -> bool {
        self.processed.insert(url.as_str().to_string())
    }

    /// Returns true once the configured record maximum is reached
    pub fn limit_reached(&self) -> bool {
        self.records.len() >= self.max_records
    }

    /// Keeps a record unless its response repeats an earlier one
    ///
    /// With `dedupe` off every record is kept.
    pub fn push_record(&mut self, record: Record, dedupe: bool) -> PageOutcome {
        if dedupe && !self.response_digests.insert(record.response_digest()) {
            return PageOutcome::Duplicate;
        }
        self.records.push(record);
        PageOutcome::Emitted
    }

    /// Offers every discovered href to the frontier, in order
    pub fn offer_links<S: AsRef<str>>(&mut self, links: &[S]) -> usize {
        let mut enqueued = 0;
        for link in links {
            self.stats.links_offered += 1;
            if self.frontier.offer(link.as_ref()).is_enqueued() {
                enqueued += 1;
            }
        }
        self.stats.links_enqueued += enqueued as u64;
        enqueued
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::synthesize;

    fn state(max_records: usize) -> CrawlState {
        let frontier = Frontier::new(Url::parse("https://wiki.osdev.org").unwrap());
        CrawlState::new(frontier, max_records)
    }

    fn record(title: &str) -> Record {
        synthesize(title, &["void f(void) { }".repeat(8)], "").unwrap()
    }

    #[test]
    fn test_begin_processing_once() {
        let mut state = state(10);
        let url = Url::parse("https://wiki.osdev.org/Paging").unwrap();
        assert!(state.begin_processing(&url));
        assert!(!state.begin_processing(&url));
    }

    #[test]
    fn test_limit_reached() {
        let mut state = state(2);
        assert!(!state.limit_reached());
        state.push_record(record("A"), true);
        assert!(!state.limit_reached());
        state.push_record(record("B"), true);
        assert!(state.limit_reached());
    }

    #[test]
    fn test_duplicate_responses_are_dropped() {
        let mut state = state(10);
        assert_eq!(state.push_record(record("A"), true), PageOutcome::Emitted);
        assert_eq!(state.push_record(record("A"), true), PageOutcome::Duplicate);
        assert_eq!(state.record_count(), 1);
    }

    #[test]
    fn test_duplicates_kept_without_dedupe() {
        let mut state = state(10);
        state.push_record(record("A"), false);
        assert_eq!(state.push_record(record("A"), false), PageOutcome::Emitted);
        assert_eq!(state.record_count(), 2);
    }

    #[test]
    fn test_offer_links_counts() {
        let mut state = state(10);
        let enqueued = state.offer_links(&["/A", "/B", "/A", "https://example.com/", "/index.php?title=A&action=edit"]);

        assert_eq!(enqueued, 2);
        assert_eq!(state.stats.links_offered, 5);
        assert_eq!(state.stats.links_enqueued, 2);
        assert_eq!(state.frontier.len(), 2);
    }
}
