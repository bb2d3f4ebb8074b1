use crate::UrlError;
use url::Url;

/// Parses and checks the crawl's base origin
///
/// Only the scheme, host and port of the result matter: every seed and
/// discovered link is an absolute path joined onto it.
///
/// # Examples
///
/// ```
/// use osdev_corpus::url::parse_base_url;
///
/// let base = parse_base_url("https://wiki.osdev.org").unwrap();
/// assert_eq!(base.as_str(), "https://wiki.osdev.org/");
/// ```
pub fn parse_base_url(base: &str) -> Result<Url, UrlError> {
    let url = Url::parse(base).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves a site-relative href against the base origin
///
/// # Rules
///
/// - The trimmed href must begin with a single `/`. Absolute external links,
///   protocol-relative `//host` links, fragment-only anchors and
///   document-relative paths are all rejected.
/// - The fragment of the resolved URL is removed, so `/Paging#PML4` and
///   `/Paging` are the same frontier entry.
/// - The query string is kept verbatim.
///
/// # Examples
///
/// ```
/// use osdev_corpus::url::{parse_base_url, resolve_site_relative};
///
/// let base = parse_base_url("https://wiki.osdev.org").unwrap();
/// let url = resolve_site_relative("/Paging#PML4", &base).unwrap();
/// assert_eq!(url.as_str(), "https://wiki.osdev.org/Paging");
/// assert!(resolve_site_relative("#top", &base).is_err());
/// ```
pub fn resolve_site_relative(href: &str, base: &Url) -> Result<Url, UrlError> {
    let href = href.trim();

    if !href.starts_with('/') || href.starts_with("//") {
        return Err(UrlError::NotSiteRelative(href.to_string()));
    }

    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    url.set_fragment(None);

    if url.host_str() != base.host_str() || url.port() != base.port() {
        return Err(UrlError::NotSiteRelative(href.to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base_url("https://wiki.osdev.org").unwrap()
    }

    #[test]
    fn test_resolve_simple_path() {
        let result = resolve_site_relative("/Paging", &base()).unwrap();
        assert_eq!(result.as_str(), "https://wiki.osdev.org/Paging");
    }

    #[test]
    fn test_resolve_ignores_base_path() {
        let base = parse_base_url("https://wiki.osdev.org/Main_Page").unwrap();
        let result = resolve_site_relative("/GDT", &base).unwrap();
        assert_eq!(result.as_str(), "https://wiki.osdev.org/GDT");
    }

    #[test]
    fn test_resolve_keeps_query() {
        let result = resolve_site_relative("/index.php?title=GDT&oldid=3", &base()).unwrap();
        assert_eq!(
            result.as_str(),
            "https://wiki.osdev.org/index.php?title=GDT&oldid=3"
        );
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let result = resolve_site_relative("/Paging#Page_Directory", &base()).unwrap();
        assert_eq!(result.fragment(), None);
        assert_eq!(result.as_str(), "https://wiki.osdev.org/Paging");
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let result = resolve_site_relative("  /IDT \n", &base()).unwrap();
        assert_eq!(result.as_str(), "https://wiki.osdev.org/IDT");
    }

    #[test]
    fn test_reject_fragment_only() {
        let result = resolve_site_relative("#section", &base());
        assert!(matches!(result, Err(UrlError::NotSiteRelative(_))));
    }

    #[test]
    fn test_reject_absolute_external() {
        assert!(resolve_site_relative("https://example.com/page", &base()).is_err());
        assert!(resolve_site_relative("https://wiki.osdev.org/Paging", &base()).is_err());
    }

    #[test]
    fn test_reject_protocol_relative() {
        assert!(resolve_site_relative("//example.com/page", &base()).is_err());
    }

    #[test]
    fn test_reject_document_relative() {
        assert!(resolve_site_relative("Paging", &base()).is_err());
        assert!(resolve_site_relative("../Paging", &base()).is_err());
    }

    #[test]
    fn test_reject_special_schemes() {
        assert!(resolve_site_relative("mailto:someone@example.com", &base()).is_err());
        assert!(resolve_site_relative("javascript:void(0)", &base()).is_err());
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(matches!(
            parse_base_url("ftp://wiki.osdev.org"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(parse_base_url("not a url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_resolve_keeps_port() {
        let base = parse_base_url("http://127.0.0.1:8080").unwrap();
        let result = resolve_site_relative("/Paging", &base).unwrap();
        assert_eq!(result.as_str(), "http://127.0.0.1:8080/Paging");
    }
}
