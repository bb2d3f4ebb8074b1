//! Page outcome definitions for tracking crawl progress
//!
//! Every popped URL ends in exactly one of these outcomes.

use std::fmt;

/// What happened to one page during the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// A record was produced and kept
    Emitted,

    /// The page had no code-like blocks
    NoCode,

    /// Code was found but the cleaned body was too short
    Rejected,

    /// The record repeated an earlier response and was dropped
    Duplicate,

    /// Fetch or parse failed; the page contributed nothing
    Skipped,

    /// The URL had already been processed
    AlreadyProcessed,
}

impl PageOutcome {
    /// Returns true if the page added a record
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emitted)
    }

    /// Returns true if the page was parsed (links were discovered from it)
    pub fn was_parsed(&self) -> bool {
        matches!(
            self,
            Self::Emitted | Self::NoCode | Self::Rejected | Self::Duplicate
        )
    }

    /// Short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emitted => "emitted",
            Self::NoCode => "no_code",
            Self::Rejected => "rejected",
            Self::Duplicate => "duplicate",
            Self::Skipped => "skipped",
            Self::AlreadyProcessed => "already_processed",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 6] {
        [
            Self::Emitted,
            Self::NoCode,
            Self::Rejected,
            Self::Duplicate,
            Self::Skipped,
            Self::AlreadyProcessed,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No URLs left to fetch
    FrontierExhausted,

    /// The configured record maximum was reached
    RecordLimitReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::RecordLimitReached => write!(f, "record limit reached"),
        }
    }
}
