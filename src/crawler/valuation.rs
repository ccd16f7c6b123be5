//! Inventory valuation over item pages
//!
//! Each item contributes price × stock to the total. Item fetches are
//! independent of each other and the sum is commutative, so they are
//! dispatched through a bounded `buffer_unordered` stream: one in flight for
//! sequential dispatch, up to the configured limit for concurrent dispatch.
//!
//! A failed item never aborts the aggregation. Fetch failures (after
//! retries) and extraction failures contribute zero, get a warn-level log
//! line, and are counted in the report.

use crate::crawler::fetcher::{fetch_html, RetryPolicy};
use crate::crawler::parser::{extract_price, extract_stock, SelectorSet};
use futures::{stream, StreamExt};
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Aggregated result over all item pages
#[derive(Debug)]
pub struct Valuation {
    /// Sum of price × stock across all items
    pub total_value: f64,

    /// Items whose price and stock both extracted cleanly
    pub items_valued: usize,

    /// Items that contributed zero because a fetch or extraction failed
    pub items_failed: usize,
}

/// Value of a single item, with a flag for degraded extraction
struct ItemOutcome {
    value: f64,
    degraded: bool,
}

/// Computes the total inventory value across the given item pages
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `item_urls` - Item detail URLs from the catalog walk
/// * `selectors` - Compiled selectors for the target site
/// * `retry` - Retry policy for item fetches
/// * `concurrency` - Maximum item fetches in flight (1 = sequential)
pub async fn total_inventory_value(
    client: &Client,
    item_urls: Vec<Url>,
    selectors: &SelectorSet,
    retry: &RetryPolicy,
    concurrency: usize,
) -> Valuation {
    let concurrency = concurrency.max(1);

    let outcomes = stream::iter(item_urls)
        .map(|url| async move { value_item(client, &url, selectors, retry).await })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    let mut valuation = Valuation {
        total_value: 0.0,
        items_valued: 0,
        items_failed: 0,
    };

    for outcome in outcomes {
        valuation.total_value += outcome.value;
        if outcome.degraded {
            valuation.items_failed += 1;
        } else {
            valuation.items_valued += 1;
        }
    }

    valuation
}

/// Fetches one item page and computes price × stock
///
/// Extraction failures are absorbed here: a missing or unreadable field
/// counts as zero for that field, and the item is marked degraded.
async fn value_item(
    client: &Client,
    url: &Url,
    selectors: &SelectorSet,
    retry: &RetryPolicy,
) -> ItemOutcome {
    let body = match fetch_html(client, url, retry).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Item fetch failed, counting zero for {}: {}", url, e);
            return ItemOutcome {
                value: 0.0,
                degraded: true,
            };
        }
    };

    // Parsed after the last await so the future stays Send
    let doc = Html::parse_document(&body);
    let mut degraded = false;

    let price = match extract_price(&doc, selectors) {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!("Price extraction failed for {}: {}", url, e);
            degraded = true;
            0.0
        }
    };

    let stock = match extract_stock(&doc, selectors) {
        Ok(stock) => stock,
        Err(e) => {
            tracing::warn!("Stock extraction failed for {}: {}", url, e);
            degraded = true;
            0
        }
    };

    ItemOutcome {
        value: price * f64::from(stock),
        degraded,
    }
}
