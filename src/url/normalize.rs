use crate::url::parse_url;
use crate::UrlError;
use url::Url;

/// Computes the visited key for a requesting page
///
/// The visited key keeps scheme, host, path and query, and drops only the
/// fragment. Two requests that differ only in their fragment share a key.
///
/// # Examples
///
/// ```
/// use crawl_ledger::url::visited_key;
///
/// let key = visited_key("https://www.ics.uci.edu/page?x=1#frag").unwrap();
/// assert_eq!(key, "https://www.ics.uci.edu/page?x=1");
/// ```
pub fn visited_key(url_str: &str) -> Result<String, UrlError> {
    let mut url = parse_url(url_str)?;
    url.set_fragment(None);
    Ok(url.into())
}

/// Removes the query string and the fragment from a URL
pub fn strip_query_and_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}

/// Normalizes a URL string into a link candidate
///
/// Candidates never carry a query or fragment, so two links that differ only
/// in tracking parameters collapse into the same candidate.
pub fn to_candidate(url_str: &str) -> Result<Url, UrlError> {
    let url = parse_url(url_str)?;
    Ok(strip_query_and_fragment(&url))
}

/// Counts the non-empty segments of a URL path
///
/// Empty segments from doubled or trailing slashes are not counted, so
/// `/a//b/` has a depth of 2.
pub fn path_depth(url: &Url) -> usize {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).count())
        .unwrap_or(0)
}
