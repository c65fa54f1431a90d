// ABOUTME: CLI for running one selector-driven extraction and printing the feed as JSON.
// ABOUTME: Parameters mirror the library Query; cache and HTTP settings map to the ClientBuilder.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use siftfeed_core::{Client, Query};
use tracing_subscriber::EnvFilter;

/// Turn any webpage into feed entries using CSS selectors.
#[derive(Parser, Debug)]
#[command(name = "siftfeed")]
#[command(about = "Extract feed entries from a webpage with CSS selectors", long_about = None)]
struct Args {
    /// Index page URL listing the latest articles.
    home_page: String,

    /// Selector for article links or their parent elements, e.g. "a.article".
    #[arg(long)]
    url_selector: String,

    /// Regex applied to candidate URLs; only matches are kept.
    #[arg(long)]
    url_pattern: Option<String>,

    /// Selector to expand each article from its own page (slower).
    #[arg(long)]
    content_selector: Option<String>,

    /// Selector for elements to remove from article content.
    #[arg(long)]
    content_cleanup: Option<String>,

    /// Literal text removed from page titles, e.g. " | BlogName".
    #[arg(long)]
    title_cleanup: Option<String>,

    /// Maximum number of entries.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Cache backend for expanded entry pages: memory, file, or null.
    #[arg(long, default_value = "memory")]
    cache: String,

    /// Storage directory for the file cache backend.
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// How long cached entry pages stay fresh, in seconds.
    #[arg(long, default_value_t = 3600)]
    cache_ttl: u64,

    /// HTTP request timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// User-Agent header for outgoing requests.
    #[arg(long)]
    user_agent: Option<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .cache_backend(&args.cache)
        .cache_ttl(Duration::from_secs(args.cache_ttl));
    if let Some(path) = &args.cache_path {
        builder = builder.cache_path(path);
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let client = builder.build()?;

    let mut query = Query::new(&args.home_page, &args.url_selector).limit(args.limit);
    if let Some(pattern) = &args.url_pattern {
        query = query.url_pattern(pattern);
    }
    if let Some(selector) = &args.content_selector {
        query = query.content_selector(selector);
    }
    if let Some(selector) = &args.content_cleanup {
        query = query.content_cleanup(selector);
    }
    if let Some(text) = &args.title_cleanup {
        query = query.title_cleanup(text);
    }

    let feed = client.run(&query).await?;

    if args.compact {
        println!("{}", serde_json::to_string(&feed)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    }

    Ok(())
}
