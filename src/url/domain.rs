use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `mailto:` or `data:` URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawl_ledger::url::extract_domain;
///
/// let url = Url::parse("https://www.ics.uci.edu/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.ics.uci.edu".to_string()));
///
/// let url = Url::parse("mailto:someone@uci.edu").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Builds the subdomain key used by the statistics store
///
/// The key is `scheme://host`, with the port appended when the URL carries a
/// non-default one, so `http://vision.ics.uci.edu/a` and
/// `http://vision.ics.uci.edu/b` count toward the same subdomain while the
/// `https` variant is tracked separately.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawl_ledger::url::subdomain_key;
///
/// let url = Url::parse("http://vision.ics.uci.edu/papers?id=3").unwrap();
/// assert_eq!(subdomain_key(&url), Some("http://vision.ics.uci.edu".to_string()));
/// ```
pub fn subdomain_key(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
