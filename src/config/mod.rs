//! Configuration module for Shelf-Tally
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use shelf_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Appraising catalog at: {}", config.catalog.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, CrawlerConfig, Dispatch, SelectorConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::load_config;
