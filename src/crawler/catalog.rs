//! Catalog walk: listing pages to item URLs
//!
//! Listing pages form a forward-only chain via next-links, so the walk is
//! inherently sequential: each page must be parsed before the next one is
//! known.

use crate::crawler::fetcher::{fetch_html, RetryPolicy};
use crate::crawler::parser::{extract_item_links, next_page_url, SelectorSet};
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Outcome of walking the listing chain
#[derive(Debug)]
pub struct CatalogWalk {
    /// Item detail URLs in page order
    pub item_urls: Vec<Url>,

    /// Listing pages successfully fetched and parsed
    pub pages_visited: usize,

    /// True when a listing fetch failed after retries and ended the walk
    /// before the terminal page
    pub truncated: bool,
}

/// Collects all item detail URLs by following the listing chain
///
/// Fetches the current listing page, accumulates its item links, and follows
/// the next-link until a page has none. A listing fetch that still fails
/// after retries ends the walk: the error is logged and the URLs gathered so
/// far are returned with `truncated` set, so a partial catalog is always
/// visible to the caller rather than passing as a complete one.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `start_url` - URL of the first listing page
/// * `selectors` - Compiled selectors for the target site
/// * `retry` - Retry policy for listing fetches
pub async fn crawl_item_urls(
    client: &Client,
    start_url: Url,
    selectors: &SelectorSet,
    retry: &RetryPolicy,
) -> CatalogWalk {
    let mut item_urls = Vec::new();
    let mut pages_visited = 0;
    let mut current = start_url;

    loop {
        let body = match fetch_html(client, &current, retry).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Ending catalog walk at {}: {}", current, e);
                return CatalogWalk {
                    item_urls,
                    pages_visited,
                    truncated: true,
                };
            }
        };
        pages_visited += 1;

        // The parsed document must not live across an await point
        let (links, next) = {
            let doc = Html::parse_document(&body);
            (
                extract_item_links(&current, &doc, selectors),
                next_page_url(&current, &doc, selectors),
            )
        };

        tracing::debug!("Found {} item links on {}", links.len(), current);
        item_urls.extend(links);

        match next {
            Some(url) => current = url,
            None => {
                tracing::info!("No next-link on {}, catalog walk complete", current);
                break;
            }
        }
    }

    CatalogWalk {
        item_urls,
        pages_visited,
        truncated: false,
    }
}
