use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for osdev-corpus
///
/// Every table is optional; a missing table or key falls back to the
/// built-in OSDev wiki defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Origin that seeds and site-relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Ordered site-relative start paths
    pub seeds: Vec<String>,

    /// Politeness delay between fetch attempts (seconds)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,

    /// Stop once this many records have been emitted
    #[serde(rename = "max-records")]
    pub max_records: usize,

    /// Per-request network timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Drop records whose response repeats an earlier one
    #[serde(rename = "dedupe-responses")]
    pub dedupe_responses: bool,
}

impl CrawlerConfig {
    /// Returns the politeness delay as a `Duration`
    ///
    /// Values no `Duration` can hold (negative, NaN, overflowing) are
    /// rejected by validation; unvalidated configs fall back to no delay.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_delay).unwrap_or(Duration::ZERO)
    }

    /// Returns the request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wiki.osdev.org".to_string(),
            seeds: [
                "/Main_Page",
                "/Category:Kernel_Development",
                "/Category:x86-64",
                "/Category:Boot_Sequence",
                "/Category:Memory_Management",
                "/Category:Interrupts",
                "/Category:Hardware",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            request_delay: 0.5,
            max_records: 200,
            request_timeout: 10,
            dedupe_responses: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Short statement of why the site is being crawled
    pub purpose: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version (purpose)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} ({})",
            self.crawler_name, self.crawler_version, self.purpose
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "OSDev-Dataset-Builder".to_string(),
            crawler_version: "1.0".to_string(),
            purpose: "for educational OS research".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON-lines record file
    #[serde(rename = "records-path")]
    pub records_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: "osdev_dataset.jsonl".to_string(),
        }
    }
}
