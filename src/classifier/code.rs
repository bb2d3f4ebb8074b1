//! Code-block detection heuristics
//!
//! The predicates here look only at extracted text, so they do not care
//! which markup parser produced the candidates.

/// A preformatted block must be longer than this many characters
pub const PRE_MIN_CHARS: usize = 20;

/// An inline code element must be longer than this many characters
pub const INLINE_MIN_CHARS: usize = 50;

/// Where a code candidate came from in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// A block-level `<pre>` element
    Preformatted,

    /// An inline `<code>` element
    Inline {
        /// Whether any ancestor of the element is a `<pre>`
        inside_preformatted: bool,
    },
}

/// Raw text of one code-bearing element, before any filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCandidate {
    pub text: String,
    pub kind: CodeKind,
}

impl CodeCandidate {
    pub fn preformatted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CodeKind::Preformatted,
        }
    }

    pub fn inline(text: impl Into<String>, inside_preformatted: bool) -> Self {
        Self {
            text: text.into(),
            kind: CodeKind::Inline {
                inside_preformatted,
            },
        }
    }
}

/// Case-insensitive check for inline assembly (`asm`, `__asm__`, `.asm` files...)
pub fn is_assembly_marker(text: &str) -> bool {
    text.to_lowercase().contains("asm")
}

/// Checks for a GCC `__attribute__` marker
pub fn is_compiler_attribute(text: &str) -> bool {
    text.contains("__attribute__")
}

/// Decides whether a `<pre>` block holds code worth keeping
pub fn is_code_like_block(text: &str) -> bool {
    text.chars().count() > PRE_MIN_CHARS
        && (text.contains('{') || is_assembly_marker(text) || is_compiler_attribute(text))
}

/// Decides whether an inline `<code>` element holds code worth keeping
pub fn is_code_like_inline(text: &str) -> bool {
    text.chars().count() > INLINE_MIN_CHARS
        && (text.contains("void") || text.contains("uint") || is_assembly_marker(text))
}

/// Picks the raw code strings to keep, preformatted blocks first
///
/// Both passes keep document order. Inline elements nested in any `<pre>`
/// are skipped because their text was already seen through the enclosing
/// block, even when that block itself was not kept.
pub fn select_code_blocks(candidates: &[CodeCandidate]) -> Vec<String> {
    let blocks = candidates
        .iter()
        .filter(|c| c.kind == CodeKind::Preformatted && is_code_like_block(&c.text));

    let inline = candidates.iter().filter(|c| match c.kind {
        CodeKind::Inline {
            inside_preformatted,
        } => !inside_preformatted && is_code_like_inline(&c.text),
        CodeKind::Preformatted => false,
    });

    blocks.chain(inline).map(|c| c.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(prefix: &str, len: usize) -> String {
        let mut text = prefix.to_string();
        while text.chars().count() < len {
            text.push('x');
        }
        text
    }

    #[test]
    fn test_block_boundary_with_brace() {
        let kept = sized("{", 21);
        let too_short = sized("{", 19);
        let exactly_twenty = sized("{", 20);

        assert!(is_code_like_block(&kept));
        assert!(!is_code_like_block(&too_short));
        assert!(!is_code_like_block(&exactly_twenty));
    }

    #[test]
    fn test_block_needs_a_marker() {
        assert!(!is_code_like_block("plain text that is long enough"));
        assert!(is_code_like_block("mov eax, 1 ; written in ASM syntax"));
        assert!(is_code_like_block("struct gdt __attribute__((packed));"));
    }

    #[test]
    fn test_inline_boundary_with_void() {
        let kept = sized("void ", 51);
        let exactly_fifty = sized("void ", 50);

        assert!(is_code_like_inline(&kept));
        assert!(!is_code_like_inline(&exactly_fifty));
    }

    #[test]
    fn test_inline_markers() {
        assert!(is_code_like_inline(&sized("uint32_t ", 60)));
        assert!(is_code_like_inline(&sized("__ASM__ ", 60)));
        assert!(!is_code_like_inline(&sized("{ int x; } ", 60)));
    }

    #[test]
    fn test_assembly_marker_is_case_insensitive() {
        assert!(is_assembly_marker("__asm__ volatile"));
        assert!(is_assembly_marker("NASM"));
        assert!(!is_assembly_marker("as m"));
    }

    #[test]
    fn test_select_keeps_blocks_before_inline() {
        let inline_text = sized("void kmain(", 60);
        let candidates = vec![
            CodeCandidate::inline(inline_text.clone(), false),
            CodeCandidate::preformatted("{ uint64_t pml4[512]; }"),
            CodeCandidate::preformatted("short {"),
            CodeCandidate::preformatted("int main() { return 0; }"),
        ];

        let kept = select_code_blocks(&candidates);
        assert_eq!(
            kept,
            vec![
                "{ uint64_t pml4[512]; }".to_string(),
                "int main() { return 0; }".to_string(),
                inline_text,
            ]
        );
    }

    #[test]
    fn test_inline_inside_pre_is_not_double_counted() {
        let text = sized("void outb(uint16_t port, uint8_t val) {", 70);
        let candidates = vec![
            CodeCandidate::preformatted(text.clone()),
            CodeCandidate::inline(text.clone(), true),
        ];

        assert_eq!(select_code_blocks(&candidates), vec![text]);
    }

    #[test]
    fn test_inline_inside_rejected_pre_is_still_skipped() {
        let text = sized("void ", 60);
        let candidates = vec![
            CodeCandidate::preformatted("tiny"),
            CodeCandidate::inline(text, true),
        ];

        assert!(select_code_blocks(&candidates).is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_code_blocks(&[]).is_empty());
    }
}
