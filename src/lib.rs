//! Shelf-Tally: a catalog inventory valuation crawler
//!
//! This crate walks a paginated book catalog, extracts the price and stock
//! quantity from each item page, and aggregates a total inventory value.

pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Shelf-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Field-extraction errors
///
/// Extraction returns a typed failure instead of collapsing to zero at the
/// point of occurrence, so callers can tell a genuinely free item from a page
/// the extractor could not read. Failures become zero contributions at the
/// valuation layer.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no element matched selector '{selector}'")]
    MissingElement { selector: String },

    #[error("no numeric text in '{text}'")]
    NoDigits { text: String },

    #[error("could not parse a number from '{text}'")]
    ParseNumber { text: String },
}

/// Result type alias for Shelf-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::appraise;
pub use output::ValuationReport;
