//! URL handling module for osdev-corpus
//!
//! This module resolves site-relative links against the crawl's base origin
//! and recognises wiki edit-action links that must never be enqueued.

mod normalize;

use url::Url;

// Re-export main functions
pub use normalize::{parse_base_url, resolve_site_relative};

/// Query keys MediaWiki uses to select a page action
const ACTION_KEYS: [&str; 2] = ["action", "veaction"];

/// Returns true if the URL asks the wiki for an edit view
///
/// A link is an edit action when its `action` or `veaction` query parameter
/// has the value `edit`.
///
/// # Examples
///
/// ```
/// use osdev_corpus::url::is_edit_action;
/// use url::Url;
///
/// let edit = Url::parse("https://wiki.osdev.org/index.php?title=GDT&action=edit").unwrap();
/// let view = Url::parse("https://wiki.osdev.org/GDT").unwrap();
/// assert!(is_edit_action(&edit));
/// assert!(!is_edit_action(&view));
/// ```
pub fn is_edit_action(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, value)| ACTION_KEYS.contains(&&*key) && value == "edit")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_action_edit() {
        assert!(is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&action=edit"
        )));
    }

    #[test]
    fn test_section_edit() {
        assert!(is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&action=edit&section=3"
        )));
    }

    #[test]
    fn test_visual_editor_action() {
        assert!(is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&veaction=edit"
        )));
    }

    #[test]
    fn test_other_actions_allowed() {
        assert!(!is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&action=history"
        )));
        assert!(!is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&oldid=29"
        )));
    }

    #[test]
    fn test_keys_merely_ending_in_action_are_not_edits() {
        assert!(!is_edit_action(&url(
            "https://wiki.osdev.org/index.php?title=Paging&transaction=edit"
        )));
        assert!(!is_edit_action(&url(
            "https://wiki.osdev.org/Redaction?redaction=edit"
        )));
    }

    #[test]
    fn test_no_query() {
        assert!(!is_edit_action(&url("https://wiki.osdev.org/Paging")));
    }

    #[test]
    fn test_edit_in_path_is_not_an_action() {
        assert!(!is_edit_action(&url("https://wiki.osdev.org/Text_editor")));
    }
}
