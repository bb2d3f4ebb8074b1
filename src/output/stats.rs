//! Crawl statistics
//!
//! This module tallies what happened to each fetched page and prints the
//! end-of-run report.

use crate::state::{PageOutcome, StopReason};
use std::collections::HashMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Number of fetch attempts made
    pub pages_attempted: u64,

    /// Attempts whose page was fetched and parsed
    pub pages_parsed: u64,

    /// Count of pages by outcome
    pub pages_by_outcome: HashMap<PageOutcome, u64>,

    /// Total hrefs offered to the frontier
    pub links_offered: u64,

    /// Hrefs that were new and enqueued
    pub links_enqueued: u64,

    /// Records emitted
    pub records: u64,

    /// Why the loop stopped, once it has
    pub stop_reason: Option<StopReason>,

    /// Wall-clock crawl time
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one page outcome
    pub fn record_outcome(&mut self, outcome: PageOutcome) {
        *self.pages_by_outcome.entry(outcome).or_insert(0) += 1;
        if outcome.was_parsed() {
            self.pages_parsed += 1;
        }
        if outcome.is_emitted() {
            self.records += 1;
        }
    }

    /// Number of pages with the given outcome
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.pages_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Share of fetch attempts that produced a record, as a percentage
    pub fn emission_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        (self.records as f64 / self.pages_attempted as f64) * 100.0
    }

    /// Pages per second over the whole run
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.pages_attempted as f64 / secs
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Fetch attempts: {}", stats.pages_attempted);
    println!("  Pages parsed: {}", stats.pages_parsed);
    println!("  Records emitted: {}", stats.records);
    println!(
        "  Links offered: {} ({} enqueued)",
        stats.links_offered, stats.links_enqueued
    );
    println!(
        "  Elapsed: {:.1}s ({:.2} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.rate()
    );
    if let Some(reason) = stats.stop_reason {
        println!("  Stopped: {}", reason);
    }
    println!();

    println!("Pages by Outcome:");
    for outcome in PageOutcome::all() {
        let count = stats.count(outcome);
        if count == 0 {
            continue;
        }
        let percentage = if stats.pages_attempted > 0 {
            (count as f64 / stats.pages_attempted as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!(
        "Emission Rate: {:.1}% ({} / {} pages produced a record)",
        stats.emission_rate(),
        stats.records,
        stats.pages_attempted
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        let mut stats = CrawlStatistics::new();
        stats.record_outcome(PageOutcome::Emitted);
        stats.record_outcome(PageOutcome::Emitted);
        stats.record_outcome(PageOutcome::NoCode);

        assert_eq!(stats.count(PageOutcome::Emitted), 2);
        assert_eq!(stats.count(PageOutcome::NoCode), 1);
        assert_eq!(stats.count(PageOutcome::Skipped), 0);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.pages_parsed, 3);
    }

    #[test]
    fn test_failed_and_repeated_pages_are_not_parsed() {
        let mut stats = CrawlStatistics::new();
        stats.record_outcome(PageOutcome::Skipped);
        stats.record_outcome(PageOutcome::AlreadyProcessed);
        stats.record_outcome(PageOutcome::Duplicate);

        assert_eq!(stats.pages_parsed, 1);
        assert_eq!(stats.records, 0);
    }

    #[test]
    fn test_every_outcome_is_counted() {
        let mut stats = CrawlStatistics::new();
        for outcome in PageOutcome::all() {
            stats.record_outcome(outcome);
        }

        for outcome in PageOutcome::all() {
            assert_eq!(stats.count(outcome), 1, "{}", outcome);
        }
        assert_eq!(stats.pages_parsed, 4);
    }

    #[test]
    fn test_emission_rate() {
        let mut stats = CrawlStatistics::new();
        stats.pages_attempted = 4;
        stats.record_outcome(PageOutcome::Emitted);

        assert!((stats.emission_rate() - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_rates_with_no_pages() {
        let stats = CrawlStatistics::new();
        assert_eq!(stats.emission_rate(), 0.0);
        assert_eq!(stats.rate(), 0.0);
    }
}
