//! Crawler module for wiki page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Wiki page parsing and link extraction
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use frontier::{Frontier, OfferOutcome};
pub use parser::{
    parse_page, Page, PageError, CHROME_SELECTOR, CONTENT_SELECTOR, TITLE_SELECTOR, UNKNOWN_TITLE,
};

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::CorpusError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier
/// 3. Fetch, classify and follow pages breadth-first
/// 4. Write the emitted records as JSON lines
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed successfully
/// * `Err(CorpusError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<CrawlStatistics, CorpusError> {
    run_crawl(config).await
}
