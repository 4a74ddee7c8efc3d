//! HTML parser for extracting outbound links
//!
//! Every `<a href="...">` is collected and resolved against the page URL.
//! Filtering is left to the scope policy; this module only turns markup into
//! absolute URLs.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all anchor links from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content (malformed markup is parsed best-effort)
/// * `base_url` - The URL relative links are resolved against
///
/// # Returns
///
/// Absolute URLs in document order. Anchors without an `href`, with an empty
/// `href`, or whose `href` cannot be resolved are skipped.
///
/// # Example
///
/// ```
/// use crawl_ledger::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/other?y=2">Link</a></body></html>"#;
/// let base_url = Url::parse("https://www.ics.uci.edu/page").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://www.ics.uci.edu/other?y=2");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None for empty hrefs and hrefs the URL parser rejects.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => Some(absolute_url),
        Err(e) => {
            tracing::trace!("Skipping unresolvable href '{}': {}", href, e);
            None
        }
    }
}
