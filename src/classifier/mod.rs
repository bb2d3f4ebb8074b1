//! Content classifier for fetched wiki pages
//!
//! This module decides whether a page carries code worth turning into a
//! record and, if so, produces:
//! - the cleaned code fragments, in the order they will be concatenated
//! - a short plain-text summary of the page's prose
//!
//! The heuristics operate on text pulled out of the page by
//! [`crate::crawler::parse_page`]; nothing here touches the markup tree.

pub mod clean;
pub mod code;
pub mod summary;

use crate::crawler::Page;

pub use clean::{clean_blocks, clean_code, strip_citations, strip_reference_comments};
pub use code::{
    is_assembly_marker, is_code_like_block, is_code_like_inline, is_compiler_attribute,
    select_code_blocks, CodeCandidate, CodeKind,
};
pub use summary::{normalize_whitespace, summarize};

/// What the classifier extracted from a relevant page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Plain-text summary of the page's leading paragraphs
    pub summary: String,

    /// Cleaned code fragments that survived the length filter
    pub code: Vec<String>,
}

/// Outcome of classifying a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The page has at least one code-like block
    Relevant(ExtractedContent),

    /// No block passed detection; no record will be produced
    NotRelevant,
}

/// Classifies a parsed page
///
/// A page is relevant when at least one raw candidate passes code detection.
/// Cleaning can still leave a relevant page with no usable fragments; the
/// record synthesizer rejects those.
pub fn classify(page: &Page) -> Classification {
    let raw = select_code_blocks(&page.code_candidates);
    if raw.is_empty() {
        tracing::debug!("No code-like blocks on '{}'", page.title);
        return Classification::NotRelevant;
    }

    let code = clean_blocks(&raw);
    tracing::debug!(
        "'{}': {} raw blocks kept, {} after cleaning",
        page.title,
        raw.len(),
        code.len()
    );

    Classification::Relevant(ExtractedContent {
        summary: summarize(&page.paragraphs, &page.title),
        code,
    })
}
