// ABOUTME: Library entry point for the siftfeed extraction pipeline.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Query, Feed, Entry, ExtractError, Cache.

//! siftfeed - turn any webpage into feed entries using CSS selectors.
//!
//! Given an index page and a selector for its entry links (or the elements
//! wrapping them), this crate extracts one entry (URI, title, and optional
//! summary content) per link, deduplicated by URL, filtered by an optional
//! regex, and capped by a limit. With a content selector, each entry is
//! additionally fetched and its summary replaced by the full article body,
//! with lazy-loaded media normalized and links rewritten to absolute form.
//!
//! # Example
//!
//! ```no_run
//! use siftfeed_core::{Client, ExtractError, Query};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build()?;
//!     let query = Query::new("https://example.com/blog/", "a.article")
//!         .content_selector("article.content")
//!         .limit(5);
//!     let feed = client.run(&query).await?;
//!     for entry in &feed.entries {
//!         println!("{}: {}", entry.title, entry.uri);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod dom;
pub mod error;
pub mod expand;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod models;
pub mod options;
pub mod query;
pub mod sanitize;
pub mod title;

pub use crate::cache::{Cache, CacheConfig, FileCache, MemoryCache, NullCache};
pub use crate::client::Client;
pub use crate::dom::{Page, PageNode};
pub use crate::error::{ExtractError, Result};
pub use crate::fetch::PageFetcher;
pub use crate::models::{Entry, Feed};
pub use crate::options::{ClientBuilder, Options};
pub use crate::query::Query;
