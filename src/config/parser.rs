use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawl_ledger::config::load_config;
///
/// let config = load_config(Path::new("ledger.toml")).unwrap();
/// println!("Database: {}", config.storage.database_path);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if one was given, otherwise the defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[storage]
database-path = "./ledger.db"
busy-timeout-ms = 250

[extraction]
min-body-bytes = 64
max-path-segments = 6

[scope]
allowed-domains = ["ics.uci.edu"]
extra-excluded-extensions = [".xml"]

[report]
top-words = 20
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.storage.database_path, "./ledger.db");
        assert_eq!(config.storage.busy_timeout_ms, 250);
        assert_eq!(config.extraction.min_body_bytes, 64);
        assert_eq!(config.extraction.max_path_segments, 6);
        assert_eq!(config.scope.allowed_domains, vec!["ics.uci.edu"]);
        assert_eq!(config.scope.extra_excluded_extensions, vec![".xml"]);
        assert_eq!(config.report.top_words, 20);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.storage.database_path, "./crawl-ledger.db");
        assert_eq!(config.extraction.min_body_bytes, 100);
        assert_eq!(config.extraction.max_path_segments, 10);
        assert_eq!(config.scope.allowed_domains.len(), 4);
        assert_eq!(config.report.top_words, 50);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let file = create_temp_config("[extraction]\nmin-body-bytes = 10\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.extraction.min_body_bytes, 10);
        assert_eq!(config.extraction.max_path_segments, 10);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/ledger.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[report]\ntop-words = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_or_default_without_path() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.report.top_words, 50);
    }
}
