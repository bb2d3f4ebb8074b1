//! Paragraph summary extraction

/// Paragraphs must be longer than this to count
pub const MIN_PARAGRAPH_CHARS: usize = 40;

/// Accumulation stops once the joined summary exceeds this length
pub const SUMMARY_BUDGET_CHARS: usize = 500;

/// At most this many paragraphs make it into the summary
pub const MAX_SUMMARY_PARAGRAPHS: usize = 3;

/// Collapses whitespace runs to one space and trims both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the page summary from its paragraphs, in document order
///
/// The paragraph that pushes the joined length over the budget is still
/// kept; only the first three kept paragraphs are used.
pub fn summarize<S: AsRef<str>>(paragraphs: &[S], title: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut joined_len = 0;

    for paragraph in paragraphs {
        let text = normalize_whitespace(paragraph.as_ref());
        let len = text.chars().count();
        if len <= MIN_PARAGRAPH_CHARS {
            continue;
        }

        joined_len += if kept.is_empty() { len } else { len + 1 };
        kept.push(text);

        if joined_len > SUMMARY_BUDGET_CHARS {
            break;
        }
    }

    if kept.is_empty() {
        return format!("Implementation details for {}.", title);
    }

    kept.truncate(MAX_SUMMARY_PARAGRAPHS);
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(word: char, len: usize) -> String {
        std::iter::repeat(word).take(len).collect()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Global \n\t Descriptor   Table "), "Global Descriptor Table");
        assert_eq!(normalize_whitespace("\u{a0}Paging\u{a0}"), "Paging");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_short_paragraphs_are_skipped() {
        let paragraphs = vec![
            "Too short.".to_string(),
            paragraph('a', 40),
            paragraph('b', 41),
        ];
        assert_eq!(summarize(&paragraphs, "GDT"), paragraph('b', 41));
    }

    #[test]
    fn test_fallback_mentions_title() {
        let paragraphs: Vec<String> = vec!["tiny".to_string()];
        assert_eq!(
            summarize(&paragraphs, "Paging"),
            "Implementation details for Paging."
        );
    }

    #[test]
    fn test_at_most_three_paragraphs() {
        let paragraphs: Vec<String> = ['a', 'b', 'c', 'd', 'e']
            .iter()
            .map(|c| paragraph(*c, 50))
            .collect();

        let summary = summarize(&paragraphs, "IDT");
        assert_eq!(
            summary,
            format!("{} {} {}", paragraph('a', 50), paragraph('b', 50), paragraph('c', 50))
        );
    }

    #[test]
    fn test_budget_crossing_paragraph_is_kept() {
        let paragraphs = vec![paragraph('a', 450), paragraph('b', 100), paragraph('c', 100)];

        let summary = summarize(&paragraphs, "APIC");
        assert_eq!(summary, format!("{} {}", paragraph('a', 450), paragraph('b', 100)));
    }

    #[test]
    fn test_single_long_paragraph_stops_accumulation() {
        let paragraphs = vec![paragraph('a', 600), paragraph('b', 50)];
        assert_eq!(summarize(&paragraphs, "PIT"), paragraph('a', 600));
    }

    #[test]
    fn test_paragraph_text_is_normalized() {
        let paragraphs = vec![format!("  {}\n\n{}  ", paragraph('a', 30), paragraph('b', 30))];
        assert_eq!(
            summarize(&paragraphs, "PIC"),
            format!("{} {}", paragraph('a', 30), paragraph('b', 30))
        );
    }
}
