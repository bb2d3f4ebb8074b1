//! HTML parser for wiki article pages
//!
//! This module turns fetched markup into a [`Page`]:
//! - strips page chrome (edit-section links, thumbnails, nav boxes,
//!   info boxes, print footers) before anything is read
//! - extracts the primary heading as the title
//! - collects paragraphs, code candidates and outbound links from the
//!   article content container, in document order

use crate::classifier::{normalize_whitespace, CodeCandidate};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Elements removed from the tree before extraction
pub const CHROME_SELECTOR: &str = ".mw-editsection, .thumb, .navbox, .infobox, .printfooter";

/// The page's primary heading
pub const TITLE_SELECTOR: &str = "h1.firstHeading";

/// The article body container
pub const CONTENT_SELECTOR: &str = "div#mw-content-text";

/// Title used when the page has no primary heading
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Errors that make a fetched document unusable
#[derive(Debug, Error)]
pub enum PageError {
    #[error("missing content container '{selector}'")]
    MissingContent { selector: &'static str },

    #[error("invalid selector '{selector}': {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

/// Extracted information from a wiki page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Whitespace-normalized primary heading, or "Unknown"
    pub title: String,

    /// Raw text of every `<p>` in the content container
    pub paragraphs: Vec<String>,

    /// Every `<pre>` block followed by every `<code>` element
    pub code_candidates: Vec<CodeCandidate>,

    /// `href` values of every anchor in the content container
    pub links: Vec<String>,
}

fn selector(css: &'static str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|e| PageError::Selector {
        selector: css,
        message: e.to_string(),
    })
}

/// Parses a fetched document into a [`Page`]
///
/// # Arguments
///
/// * `html` - The raw document text
///
/// # Returns
///
/// * `Ok(Page)` - The page's title, prose, code candidates and links
/// * `Err(PageError)` - The document has no content container
///
/// # Example
///
/// ```
/// use osdev_corpus::crawler::parse_page;
///
/// let html = r#"<html><body><h1 class="firstHeading">GDT</h1>
///     <div id="mw-content-text"><p>Intro</p><a href="/IDT">IDT</a></div></body></html>"#;
/// let page = parse_page(html).unwrap();
/// assert_eq!(page.title, "GDT");
/// assert_eq!(page.links, vec!["/IDT".to_string()]);
/// ```
pub fn parse_page(html: &str) -> Result<Page, PageError> {
    let mut document = Html::parse_document(html);
    strip_chrome(&mut document)?;

    let root = document.root_element();
    let title = extract_title(root)?;

    let content = root
        .select(&selector(CONTENT_SELECTOR)?)
        .next()
        .ok_or(PageError::MissingContent {
            selector: CONTENT_SELECTOR,
        })?;

    Ok(Page {
        title,
        paragraphs: extract_paragraphs(content)?,
        code_candidates: extract_code_candidates(content)?,
        links: extract_links(content)?,
    })
}

/// Detaches every chrome element from the tree
///
/// Selection goes through the root element so only attached nodes are
/// visited; detaching a node inside an already detached subtree is harmless.
fn strip_chrome(document: &mut Html) -> Result<(), PageError> {
    let chrome = selector(CHROME_SELECTOR)?;
    let ids: Vec<_> = document
        .root_element()
        .select(&chrome)
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    Ok(())
}

/// Extracts the primary heading, falling back to "Unknown"
fn extract_title(root: ElementRef<'_>) -> Result<String, PageError> {
    let title = root
        .select(&selector(TITLE_SELECTOR)?)
        .next()
        .map(|heading| normalize_whitespace(&heading.text().collect::<String>()))
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    Ok(title)
}

fn extract_paragraphs(content: ElementRef<'_>) -> Result<Vec<String>, PageError> {
    Ok(content
        .select(&selector("p")?)
        .map(|p| p.text().collect::<String>())
        .collect())
}

/// Collects `<pre>` blocks, then `<code>` elements tagged with whether
/// they sit inside a `<pre>`
fn extract_code_candidates(content: ElementRef<'_>) -> Result<Vec<CodeCandidate>, PageError> {
    let mut candidates: Vec<CodeCandidate> = content
        .select(&selector("pre")?)
        .map(|pre| CodeCandidate::preformatted(pre.text().collect::<String>()))
        .collect();

    for code in content.select(&selector("code")?) {
        let inside_pre = code.ancestors().any(|node| {
            node.value()
                .as_element()
                .is_some_and(|element| element.name() == "pre")
        });
        candidates.push(CodeCandidate::inline(
            code.text().collect::<String>(),
            inside_pre,
        ));
    }

    Ok(candidates)
}

fn extract_links(content: ElementRef<'_>) -> Result<Vec<String>, PageError> {
    Ok(content
        .select(&selector("a[href]")?)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}
