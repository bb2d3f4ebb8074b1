//! Code cleaning: wiki citation debris removal

use regex::Regex;
use std::sync::LazyLock;

/// Cleaned blocks shorter than this are dropped from the record body
pub const MIN_CLEANED_CHARS: usize = 30;

/// `[12]`-style citation markers
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("citation pattern is valid"));

/// A `//` comment carrying a `[...]` reference, up to end of line
static REFERENCE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[^\n]*\[[^\]\n]*\][^\n]*").expect("reference comment pattern is valid")
});

/// Removes bracketed citation markers
///
/// Runs to a fixed point, so markers exposed by an earlier removal
/// (`[1[2]]` becomes `[1]`) are removed too and a second call never
/// changes the result.
pub fn strip_citations(code: &str) -> String {
    let mut current = code.to_string();
    loop {
        let next = CITATION_RE.replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Removes single-line comments that contain a bracketed reference
pub fn strip_reference_comments(code: &str) -> String {
    REFERENCE_COMMENT_RE.replace_all(code, "").into_owned()
}

/// Cleans one raw code block
pub fn clean_code(code: &str) -> String {
    let without_citations = strip_citations(code);
    strip_reference_comments(&without_citations)
        .trim()
        .to_string()
}

/// Cleans every kept block and drops the ones that end up too short
pub fn clean_blocks(blocks: &[String]) -> Vec<String> {
    blocks
        .iter()
        .map(|block| clean_code(block))
        .filter(|cleaned| cleaned.chars().count() >= MIN_CLEANED_CHARS)
        .collect()
}
