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
/// use shelf_tally::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Start URL: {}", config.catalog.start_url);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Dispatch;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[catalog]
start-url = "https://books.example.com/"

[crawler]
dispatch = "concurrent"
max-concurrent-fetches = 8
request-timeout-secs = 30
max-retries = 3
retry-base-delay-ms = 500

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.catalog.start_url, "https://books.example.com/");
        assert_eq!(config.crawler.dispatch, Dispatch::Concurrent);
        assert_eq!(config.crawler.max_concurrent_fetches, 8);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
    }

    #[test]
    fn test_selectors_default_when_absent() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.selectors.price, "p.price_color");
        assert_eq!(config.selectors.next_page, "li.next > a");
    }

    #[test]
    fn test_selector_overrides_are_honored() {
        let config_content = format!(
            "{}\n[selectors]\nprice = \"span.amount\"\n",
            VALID_CONFIG
        );
        let file = create_temp_config(&config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.selectors.price, "span.amount");
        // Unspecified selectors keep their defaults
        assert_eq!(config.selectors.availability, "p.instock.availability");
    }

    #[test]
    fn test_dispatch_defaults_to_concurrent() {
        let config_content = VALID_CONFIG.replace("dispatch = \"concurrent\"\n", "");
        let file = create_temp_config(&config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.dispatch, Dispatch::Concurrent);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = VALID_CONFIG.replace(
            "max-concurrent-fetches = 8",
            "max-concurrent-fetches = 0",
        );
        let file = create_temp_config(&config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_bad_selector() {
        let config_content = format!(
            "{}\n[selectors]\nprice = \"p..[\"\n",
            VALID_CONFIG
        );
        let file = create_temp_config(&config_content);
        let result = load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidSelector(_)
        ));
    }
}
