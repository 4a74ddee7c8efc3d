//! Scope policy for deciding which URLs belong to the crawl
//!
//! A URL is in scope when it uses an allowed scheme, does not point at an
//! excluded file type, lives under one of the allowed domain suffixes, and does
//! not match a known crawl trap. The rules are held in [`ScopePolicy`] as data;
//! the default policy is built from [`tables`].

pub mod tables;

use crate::config::ScopeConfig;
use crate::url::{extract_domain, matches_domain_suffix, parse_url};
use crate::UrlError;
use std::fmt;
use tables::{TrapPattern, TrapTarget};
use url::Url;

/// Outcome of a scope check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeVerdict {
    /// URL may be crawled
    InScope,
    /// Scheme is not http or https
    UnsupportedScheme(String),
    /// Path ends with an excluded file extension
    ExcludedExtension(String),
    /// Host is not under any allowed domain suffix
    OutsideAllowedDomains(String),
    /// URL matches a known crawl trap
    TrapPattern(&'static str),
}

impl ScopeVerdict {
    /// Returns true if the URL may be crawled
    pub fn is_in_scope(&self) -> bool {
        matches!(self, Self::InScope)
    }
}

impl fmt::Display for ScopeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InScope => write!(f, "in scope"),
            Self::UnsupportedScheme(scheme) => write!(f, "unsupported scheme '{}'", scheme),
            Self::ExcludedExtension(ext) => write!(f, "excluded extension '{}'", ext),
            Self::OutsideAllowedDomains(host) => {
                write!(f, "host '{}' is outside the allowed domains", host)
            }
            Self::TrapPattern(needle) => write!(f, "matches trap pattern '{}'", needle),
        }
    }
}

/// Data-driven scope rules
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    schemes: Vec<String>,
    allowed_domains: Vec<String>,
    excluded_extensions: Vec<String>,
    trap_patterns: Vec<TrapPattern>,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            schemes: to_owned(tables::ALLOWED_SCHEMES),
            allowed_domains: to_owned(tables::ALLOWED_DOMAINS),
            excluded_extensions: to_owned(tables::EXCLUDED_EXTENSIONS),
            trap_patterns: tables::TRAP_PATTERNS.to_vec(),
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ScopePolicy {
    /// Builds a policy from the `[scope]` configuration section
    ///
    /// The configured domain list replaces the default allow-list; extra
    /// extensions are appended to the built-in table.
    pub fn from_config(config: &ScopeConfig) -> Self {
        let mut policy = Self::default();

        policy.allowed_domains = config
            .allowed_domains
            .iter()
            .map(|d| d.trim().to_lowercase())
            .collect();

        for ext in &config.extra_excluded_extensions {
            let ext = ext.trim().to_lowercase();
            let ext = if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            };
            if !policy.excluded_extensions.contains(&ext) {
                policy.excluded_extensions.push(ext);
            }
        }

        policy
    }

    /// Domain suffixes this policy accepts
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Explains the scope decision for a URL string
    ///
    /// # Returns
    ///
    /// * `Ok(ScopeVerdict)` - The URL parsed; the verdict says whether it is in scope
    /// * `Err(UrlError)` - The URL could not be parsed or has no host
    pub fn check(&self, url_str: &str) -> Result<ScopeVerdict, UrlError> {
        let url = parse_url(url_str)?;
        self.check_url(&url)
    }

    /// Explains the scope decision for an already parsed URL
    pub fn check_url(&self, url: &Url) -> Result<ScopeVerdict, UrlError> {
        let scheme = url.scheme();
        if !self.schemes.iter().any(|s| s == scheme) {
            return Ok(ScopeVerdict::UnsupportedScheme(scheme.to_string()));
        }

        let path = url.path().to_lowercase();
        if let Some(ext) = self
            .excluded_extensions
            .iter()
            .find(|ext| path.ends_with(ext.as_str()))
        {
            return Ok(ScopeVerdict::ExcludedExtension(ext.clone()));
        }

        let host = extract_domain(url).ok_or(UrlError::MissingDomain)?;
        if !self
            .allowed_domains
            .iter()
            .any(|suffix| matches_domain_suffix(suffix, &host))
        {
            return Ok(ScopeVerdict::OutsideAllowedDomains(host));
        }

        let query = url.query().unwrap_or("").to_lowercase();
        for trap in &self.trap_patterns {
            let haystack = match trap.target {
                TrapTarget::Path => &path,
                TrapTarget::Query => &query,
            };
            if haystack.contains(trap.needle) {
                return Ok(ScopeVerdict::TrapPattern(trap.needle));
            }
        }

        Ok(ScopeVerdict::InScope)
    }

    /// Returns true if the URL belongs to the crawl
    ///
    /// Malformed URLs are out of scope; the parse error is logged and dropped.
    pub fn is_in_scope(&self, url_str: &str) -> bool {
        match self.check(url_str) {
            Ok(verdict) => verdict.is_in_scope(),
            Err(e) => {
                tracing::trace!("Rejecting {}: {}", url_str, e);
                false
            }
        }
    }
}
