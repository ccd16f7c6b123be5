use serde::Deserialize;

/// Main configuration structure for Shelf-Tally
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Catalog to appraise
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// URL of the first listing page
    #[serde(rename = "start-url")]
    pub start_url: String,
}

/// CSS selectors the target site is expected to honor
///
/// The defaults match the known catalog markup. They are configurable because
/// the selectors are a contract with an external site and the site side of
/// that contract can change without notice.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Element holding the item price text
    #[serde(default = "default_price_selector")]
    pub price: String,

    /// Element holding the availability/stock text
    #[serde(default = "default_availability_selector")]
    pub availability: String,

    /// Anchors on a listing page that link to item detail pages
    #[serde(rename = "item-links", default = "default_item_links_selector")]
    pub item_links: String,

    /// Anchor pointing at the next listing page
    #[serde(rename = "next-page", default = "default_next_page_selector")]
    pub next_page: String,
}

fn default_price_selector() -> String {
    "p.price_color".to_string()
}

fn default_availability_selector() -> String {
    "p.instock.availability".to_string()
}

fn default_item_links_selector() -> String {
    "h3 > a".to_string()
}

fn default_next_page_selector() -> String {
    "li.next > a".to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            price: default_price_selector(),
            availability: default_availability_selector(),
            item_links: default_item_links_selector(),
            next_page: default_next_page_selector(),
        }
    }
}

/// How item fetches are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// One item fetch at a time, in discovery order
    Sequential,
    /// Up to `max-concurrent-fetches` item fetches in flight
    Concurrent,
}

fn default_dispatch() -> Dispatch {
    Dispatch::Concurrent
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Item fetch dispatch mode
    #[serde(default = "default_dispatch")]
    pub dispatch: Dispatch,

    /// Maximum number of item fetches in flight under concurrent dispatch
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Retries after the first failed attempt of a fetch
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries, in milliseconds
    #[serde(rename = "retry-base-delay-ms")]
    pub retry_base_delay_ms: u64,
}

impl CrawlerConfig {
    /// Number of item fetches allowed in flight for the configured dispatch mode
    pub fn dispatch_limit(&self) -> usize {
        match self.dispatch {
            Dispatch::Sequential => 1,
            Dispatch::Concurrent => self.max_concurrent_fetches.max(1) as usize,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}
