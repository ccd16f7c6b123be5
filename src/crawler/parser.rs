//! HTML parsing and field extraction
//!
//! This module pulls the structured facts out of catalog pages:
//! - price and stock quantity from item detail pages
//! - item detail links from listing pages
//! - the next-page link that chains listing pages together
//!
//! Prices and stock counts are embedded in human-readable text such as
//! "£51.77" and "In stock (3 available)", so extraction is a selector lookup
//! followed by a numeric pattern match over the element text.

use crate::config::SelectorConfig;
use crate::{ConfigError, ExtractError};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// The compiled selectors for one target site
///
/// Compiled once at startup from [`SelectorConfig`] and shared by reference
/// across all page parses.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    raw: SelectorConfig,
    price: Selector,
    availability: Selector,
    item_links: Selector,
    next_page: Selector,
}

impl SelectorSet {
    /// Compiles the configured selector strings
    ///
    /// # Arguments
    ///
    /// * `config` - Raw selector strings from the configuration file
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorSet)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector string does not parse as CSS
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: config.clone(),
            price: compile_selector(&config.price)?,
            availability: compile_selector(&config.availability)?,
            item_links: compile_selector(&config.item_links)?,
            next_page: compile_selector(&config.next_page)?,
        })
    }
}

fn compile_selector(raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", raw, e)))
}

/// First decimal number in a string, e.g. "51.77" out of "£51.77"
fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("hard-coded pattern compiles")
    })
}

/// First integer in a string, e.g. "3" out of "In stock (3 available)"
fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("hard-coded pattern compiles"))
}

/// Extracts the price from an item detail page
///
/// Looks up the designated price element and parses the first decimal
/// substring of its text as the price. The currency symbol and any
/// surrounding text are ignored.
///
/// # Arguments
///
/// * `doc` - The parsed item page
/// * `selectors` - Compiled selectors for the target site
///
/// # Returns
///
/// * `Ok(f64)` - The price
/// * `Err(ExtractError)` - Element missing, no digits, or unparseable number
pub fn extract_price(doc: &Html, selectors: &SelectorSet) -> Result<f64, ExtractError> {
    let element = doc
        .select(&selectors.price)
        .next()
        .ok_or_else(|| ExtractError::MissingElement {
            selector: selectors.raw.price.clone(),
        })?;

    let text = element.text().collect::<String>();
    let text = text.trim();

    let matched = decimal_pattern()
        .find(text)
        .ok_or_else(|| ExtractError::NoDigits {
            text: text.to_string(),
        })?;

    matched
        .as_str()
        .parse::<f64>()
        .map_err(|_| ExtractError::ParseNumber {
            text: matched.as_str().to_string(),
        })
}

/// Extracts the stock quantity from an item detail page
///
/// Same contract as [`extract_price`], against the availability element and
/// with an integer pattern.
pub fn extract_stock(doc: &Html, selectors: &SelectorSet) -> Result<u32, ExtractError> {
    let element = doc
        .select(&selectors.availability)
        .next()
        .ok_or_else(|| ExtractError::MissingElement {
            selector: selectors.raw.availability.clone(),
        })?;

    let text = element.text().collect::<String>();
    let text = text.trim();

    let matched = integer_pattern()
        .find(text)
        .ok_or_else(|| ExtractError::NoDigits {
            text: text.to_string(),
        })?;

    matched
        .as_str()
        .parse::<u32>()
        .map_err(|_| ExtractError::ParseNumber {
            text: matched.as_str().to_string(),
        })
}

/// Extracts item detail links from a listing page
///
/// Selects the item-link anchors, skips any without an href, and resolves
/// each href against the listing page's own URL. Hrefs that do not resolve
/// are skipped with a debug log line; this function itself never fails.
///
/// # Arguments
///
/// * `base_url` - URL of the listing page the document came from
/// * `doc` - The parsed listing page
/// * `selectors` - Compiled selectors for the target site
///
/// # Returns
///
/// Absolute item URLs in document order
pub fn extract_item_links(base_url: &Url, doc: &Html, selectors: &SelectorSet) -> Vec<Url> {
    let mut links = Vec::new();

    for element in doc.select(&selectors.item_links) {
        if let Some(href) = element.value().attr("href") {
            match base_url.join(href) {
                Ok(absolute) => links.push(absolute),
                Err(e) => {
                    tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
                }
            }
        }
    }

    links
}

/// Finds the next listing page, if any
///
/// Selects the designated next-link anchor and resolves its href against the
/// current listing page URL. `None` signals the terminal page of the catalog.
/// The walk relies on the catalog being finite and forward-only; there is no
/// cycle detection.
pub fn next_page_url(current_url: &Url, doc: &Html, selectors: &SelectorSet) -> Option<Url> {
    let element = doc.select(&selectors.next_page).next()?;
    let href = element.value().attr("href")?;

    match current_url.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Next-link href '{}' did not resolve: {}", href, e);
            None
        }
    }
}
