//! Crawler module for catalog fetching and valuation
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with bounded retry
//! - HTML parsing and field/link extraction
//! - The listing-chain walk that discovers item URLs
//! - Concurrent valuation over item pages

mod catalog;
mod fetcher;
mod parser;
mod valuation;

pub use catalog::{crawl_item_urls, CatalogWalk};
pub use fetcher::{build_http_client, fetch_html, RetryPolicy};
pub use parser::{
    extract_item_links, extract_price, extract_stock, next_page_url, SelectorSet,
};
pub use valuation::{total_inventory_value, Valuation};

use crate::config::Config;
use crate::output::ValuationReport;
use crate::TallyError;
use url::Url;

/// Appraises the catalog described by the configuration
///
/// This is the main entry point. It will:
/// 1. Compile the configured selectors
/// 2. Build the HTTP client
/// 3. Walk the listing chain to collect item URLs
/// 4. Fetch and value every item page
/// 5. Assemble the valuation report
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(ValuationReport)` - Appraisal finished (possibly with a truncated
///   catalog or degraded items, both visible in the report)
/// * `Err(TallyError)` - Setup failed before any page was fetched
pub async fn appraise(config: Config) -> Result<ValuationReport, TallyError> {
    let started_at = chrono::Utc::now();
    let clock = std::time::Instant::now();

    let selectors = SelectorSet::compile(&config.selectors)?;
    let client = build_http_client(&config.user_agent, &config.crawler)?;
    let retry = RetryPolicy::from_config(&config.crawler);
    let start_url = Url::parse(&config.catalog.start_url)?;

    tracing::info!("Starting catalog walk from {}", start_url);
    let walk = crawl_item_urls(&client, start_url, &selectors, &retry).await;
    tracing::info!(
        "Discovered {} item URLs across {} listing pages",
        walk.item_urls.len(),
        walk.pages_visited
    );

    let valuation = total_inventory_value(
        &client,
        walk.item_urls,
        &selectors,
        &retry,
        config.crawler.dispatch_limit(),
    )
    .await;

    tracing::info!(
        "Valued {} items ({} counted as zero) in {:?}",
        valuation.items_valued,
        valuation.items_failed,
        clock.elapsed()
    );

    Ok(ValuationReport {
        total_value: valuation.total_value,
        items_valued: valuation.items_valued,
        items_failed: valuation.items_failed,
        pages_visited: walk.pages_visited,
        catalog_truncated: walk.truncated,
        started_at,
        elapsed: clock.elapsed(),
    })
}
