use crate::config::types::{Config, ExtractionConfig, ReportConfig, ScopeConfig, StorageConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_extraction_config(&config.extraction)?;
    validate_scope_config(&config.scope)?;
    validate_report_config(&config.report)?;
    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.busy_timeout_ms > 600_000 {
        return Err(ConfigError::Validation(format!(
            "busy_timeout_ms must be <= 600000ms, got {}ms",
            config.busy_timeout_ms
        )));
    }

    Ok(())
}

/// Validates extraction limits
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.max_path_segments < 1 {
        return Err(ConfigError::Validation(format!(
            "max_path_segments must be >= 1, got {}",
            config.max_path_segments
        )));
    }

    Ok(())
}

/// Validates the crawl boundary
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains must list at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain.trim())?;
    }

    for ext in &config.extra_excluded_extensions {
        validate_extension(ext.trim())?;
    }

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.top_words < 1 || config.top_words > 1000 {
        return Err(ConfigError::Validation(format!(
            "top_words must be between 1 and 1000, got {}",
            config.top_words
        )));
    }

    Ok(())
}

/// Validates a domain suffix
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    // Check that it doesn't start or end with a dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    // Check for consecutive dots
    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    // A bare TLD would put the whole internet in scope
    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'ics.uci.edu')",
            domain
        )));
    }

    Ok(())
}

/// Validates an extension entry such as `.xml` or `xml`
fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    let bare = ext.strip_prefix('.').unwrap_or(ext);

    if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Invalid excluded extension '{}'",
            ext
        )));
    }

    Ok(())
}
