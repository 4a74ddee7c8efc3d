/// Checks if a host falls under an allowed domain suffix
///
/// A host matches when it equals the suffix or is a subdomain of it. The match
/// is anchored on a label boundary, so `notics.uci.edu` does not match
/// `ics.uci.edu` and `ics.uci.edu.attacker.com` matches nothing.
///
/// Both arguments are expected to be lowercase.
///
/// # Examples
///
/// ```
/// use crawl_ledger::url::matches_domain_suffix;
///
/// assert!(matches_domain_suffix("ics.uci.edu", "ics.uci.edu"));
/// assert!(matches_domain_suffix("ics.uci.edu", "www.ics.uci.edu"));
/// assert!(matches_domain_suffix("ics.uci.edu", "wiki.ngs.ics.uci.edu"));
/// assert!(!matches_domain_suffix("ics.uci.edu", "notics.uci.edu"));
/// assert!(!matches_domain_suffix("ics.uci.edu", "ics.uci.edu.attacker.com"));
/// ```
pub fn matches_domain_suffix(suffix: &str, host: &str) -> bool {
    if suffix.is_empty() || host.is_empty() {
        return false;
    }

    match host.strip_suffix(suffix) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}
