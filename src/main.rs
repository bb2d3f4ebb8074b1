//! osdev-corpus main entry point
//!
//! This is the command-line interface for the osdev-corpus record harvester.

use anyhow::Context;
use clap::Parser;
use osdev_corpus::config::{read_config_with_hash, validate, Config};
use osdev_corpus::crawler::{crawl, Frontier};
use osdev_corpus::output::{count_records, print_statistics};
use osdev_corpus::url::parse_base_url;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// osdev-corpus: harvests code-bearing wiki pages into training records
///
/// osdev-corpus crawls a documentation wiki breadth-first from a set of seed
/// pages, keeps the pages that carry real source code, and writes one
/// instruction/response record per page as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "osdev-corpus")]
#[command(version = "1.0.0")]
#[command(about = "Harvests wiki code examples into training records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the records output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the maximum number of records to emit
    #[arg(long, value_name = "N")]
    max_records: Option<usize>,

    /// Override the delay between requests (seconds)
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "count")]
    dry_run: bool,

    /// Count the records in an existing output file and exit
    #[arg(long, conflicts_with = "dry_run")]
    count: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.count {
        handle_count(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("osdev_corpus=info,warn"),
            1 => EnvFilter::new("osdev_corpus=debug,info"),
            2 => EnvFilter::new("osdev_corpus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies CLI overrides and validates
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, cli);

    // file values are only checked once the overrides are in place
    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Applies the per-knob command-line overrides
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.records_path = output.display().to_string();
    }
    if let Some(max_records) = cli.max_records {
        config.crawler.max_records = max_records;
    }
    if let Some(delay) = cli.delay {
        config.crawler.request_delay = delay;
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== osdev-corpus Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Request delay: {}s", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Max records: {}", config.crawler.max_records);
    println!("  Dedupe responses: {}", config.crawler.dedupe_responses);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);

    let mut frontier = Frontier::new(parse_base_url(&config.crawler.base_url)?);
    let seeded = frontier.seed(&config.crawler.seeds)?;
    println!("\nSeeds ({} under {}):", seeded, frontier.base());
    for url in frontier.pending() {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} seed URLs", seeded);

    Ok(())
}

/// Handles the --count mode: tallies records in an existing output file
fn handle_count(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.records_path);
    let tally = count_records(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    println!("Records file: {}", path.display());
    println!("  Records: {}", tally.records);
    println!("  Malformed lines: {}", tally.malformed);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} from {} seeds (max {} records)",
        config.crawler.base_url,
        config.crawler.seeds.len(),
        config.crawler.max_records
    );

    let records_path = config.output.records_path.clone();

    // Run the crawler
    match crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats);
            println!("\nDone! {} records -> {}", stats.records, records_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
