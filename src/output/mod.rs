//! Output module for emitted records and crawl reports
//!
//! This module handles:
//! - Writing records as JSON lines behind the `RecordSink` trait
//! - Counting records in an existing output file
//! - Recording and printing crawl statistics

mod jsonl;
pub mod stats;
mod traits;

pub use jsonl::{count_records, JsonlWriter, RecordTally};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};
