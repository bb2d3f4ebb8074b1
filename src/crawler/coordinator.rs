//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Seeding and draining the breadth-first frontier
//! - Fetching and parsing each page
//! - Classifying pages and synthesizing records
//! - Feeding discovered links back into the frontier
//! - Stopping on frontier exhaustion or the record limit

use crate::classifier::{classify, Classification};
use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{parse_page, Page};
use crate::output::{CrawlStatistics, JsonlWriter, OutputResult, RecordSink};
use crate::record::{synthesize, Record};
use crate::state::{CrawlState, PageOutcome, StopReason};
use crate::url::parse_base_url;
use crate::CorpusError;
use std::path::Path;
use tokio::time::Instant;
use url::Url;

/// Main crawler coordinator structure
///
/// Owns the run's [`CrawlState`] exclusively; one fetch is in flight at a
/// time and the politeness delay is awaited inline between fetches.
pub struct Coordinator<F> {
    config: CrawlerConfig,
    fetcher: F,
    state: CrawlState,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator with the seed paths already enqueued
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - The page fetcher to use
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CorpusError)` - The base URL or a seed path is invalid
    pub fn new(config: CrawlerConfig, fetcher: F) -> Result<Self, CorpusError> {
        let base = parse_base_url(&config.base_url)?;
        let mut frontier = Frontier::new(base);
        let seeded = frontier.seed(&config.seeds)?;
        tracing::info!("Seeded frontier with {} URLs", seeded);

        let state = CrawlState::new(frontier, config.max_records);

        Ok(Self {
            config,
            fetcher,
            state,
        })
    }

    /// Runs the main crawl loop until a stop condition is met
    ///
    /// Each iteration pops one URL, fetches and parses it, classifies it,
    /// maybe emits a record, offers its links while the record limit has not
    /// been reached, and then waits out the politeness delay.
    pub async fn run(&mut self) -> StopReason {
        let start_time = Instant::now();
        let delay = self.config.delay();

        let reason = loop {
            if self.state.limit_reached() {
                break StopReason::RecordLimitReached;
            }

            let url = match self.state.frontier.pop() {
                Some(url) => url,
                None => break StopReason::FrontierExhausted,
            };

            let outcome = self.process_url(&url).await;
            self.state.stats.record_outcome(outcome);
            tracing::debug!("{} -> {}", url, outcome);

            if outcome == PageOutcome::AlreadyProcessed {
                continue;
            }

            let attempted = self.state.stats.pages_attempted;
            if attempted % 10 == 0 {
                let rate = attempted as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages fetched, {}/{} records, {} in frontier, {:.2} pages/sec",
                    attempted,
                    self.state.record_count(),
                    self.state.max_records(),
                    self.state.frontier.len(),
                    rate
                );
            }

            let more_to_do = !self.state.limit_reached() && !self.state.frontier.is_empty();
            if more_to_do && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        };

        self.state.stats.stop_reason = Some(reason);
        self.state.stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl stopped ({}): {} records from {} pages in {:?}",
            reason,
            self.state.record_count(),
            self.state.stats.pages_attempted,
            self.state.stats.elapsed
        );

        reason
    }

    /// Processes a single URL
    ///
    /// Fetch and parse failures are logged and turned into
    /// [`PageOutcome::Skipped`]; they never end the crawl.
    async fn process_url(&mut self, url: &Url) -> PageOutcome {
        if !self.state.begin_processing(url) {
            tracing::debug!("Already processed {}", url);
            return PageOutcome::AlreadyProcessed;
        }

        self.state.stats.pages_attempted += 1;
        tracing::info!("[{}] Fetching: {}", self.state.record_count(), url);

        let page = match self.load_page(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skip {}: {}", url, e);
                return PageOutcome::Skipped;
            }
        };

        let outcome = self.harvest(&page);

        if !self.state.limit_reached() {
            let enqueued = self.state.offer_links(&page.links);
            tracing::debug!(
                "{}: {} links found, {} enqueued",
                url,
                page.links.len(),
                enqueued
            );
        }

        outcome
    }

    /// Fetches and parses one page
    async fn load_page(&self, url: &Url) -> Result<Page, CorpusError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(parse_page(&body)?)
    }

    /// Classifies a parsed page and keeps its record, if any
    fn harvest(&mut self, page: &Page) -> PageOutcome {
        let content = match classify(page) {
            Classification::Relevant(content) => content,
            Classification::NotRelevant => return PageOutcome::NoCode,
        };

        let record = match synthesize(&page.title, &content.code, &content.summary) {
            Some(record) => record,
            None => {
                tracing::debug!("'{}': code body too short, no record", page.title);
                return PageOutcome::Rejected;
            }
        };

        let outcome = self
            .state
            .push_record(record, self.config.dedupe_responses);
        if outcome == PageOutcome::Duplicate {
            tracing::debug!("'{}': response repeats an earlier record", page.title);
        }
        outcome
    }

    /// Writes every accumulated record to `sink`, in emission order
    pub fn finish<S: RecordSink>(&self, sink: &mut S) -> OutputResult<usize> {
        sink.write_all(self.state.records())
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn records(&self) -> &[Record] {
        self.state.records()
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.state.stats
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Create the configured JSON-lines file
/// 2. Build the HTTP client and seed the frontier
/// 3. Run the crawl loop until the frontier empties or the record limit hits
/// 4. Write all records to the file
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed and records were written
/// * `Err(CorpusError)` - The output file could not be created or written, or setup failed
///
/// # Example
///
/// ```no_run
/// use osdev_corpus::config::Config;
/// use osdev_corpus::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(Config::default()).await?;
/// println!("{} records", stats.records);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics, CorpusError> {
    let path = Path::new(&config.output.records_path);
    // an unwritable output path fails here, before any page is fetched
    let mut sink = JsonlWriter::create(path)?;

    let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
    let mut coordinator = Coordinator::new(config.crawler.clone(), fetcher)?;
    coordinator.run().await;

    let written = coordinator.finish(&mut sink)?;
    tracing::info!("Wrote {} records to {}", written, path.display());

    Ok(coordinator.statistics().clone())
}
