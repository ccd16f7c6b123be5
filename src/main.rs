//! Shelf-Tally main entry point
//!
//! This is the command-line interface for the Shelf-Tally catalog appraiser.

use anyhow::Context;
use clap::Parser;
use shelf_tally::config::load_config;
use shelf_tally::crawler::appraise;
use shelf_tally::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Tally: a catalog inventory valuation crawler
///
/// Shelf-Tally walks a paginated book catalog, extracts the price and stock
/// quantity of every item, and reports the total inventory value.
#[derive(Parser, Debug)]
#[command(name = "shelf-tally")]
#[command(version = "1.0.0")]
#[command(about = "A catalog inventory valuation crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the catalog start URL from the config file
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be appraised without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    // Apply the start URL override, if any
    if let Some(start_url) = cli.start_url {
        url::Url::parse(&start_url).context("invalid --start-url")?;
        config.catalog.start_url = start_url;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let report = appraise(config).await?;
    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_tally=info,warn"),
            1 => EnvFilter::new("shelf_tally=debug,info"),
            2 => EnvFilter::new("shelf_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be appraised
fn handle_dry_run(config: &shelf_tally::config::Config) {
    println!("=== Shelf-Tally Dry Run ===\n");

    println!("Catalog:");
    println!("  Start URL: {}", config.catalog.start_url);

    println!("\nSelectors:");
    println!("  Price:        {}", config.selectors.price);
    println!("  Availability: {}", config.selectors.availability);
    println!("  Item links:   {}", config.selectors.item_links);
    println!("  Next page:    {}", config.selectors.next_page);

    println!("\nCrawler:");
    println!("  Dispatch: {:?}", config.crawler.dispatch);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!(
        "  Retries: {} (base delay {}ms)",
        config.crawler.max_retries, config.crawler.retry_base_delay_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");
    println!("✓ Would appraise the catalog at {}", config.catalog.start_url);
}
