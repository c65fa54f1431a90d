// ABOUTME: The Client: wires fetcher and cache together and runs the extraction pipeline.
// ABOUTME: One run() call per request; every stage completes before the next begins.

use tracing::debug;

use crate::cache;
use crate::error::ExtractError;
use crate::expand;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::filter;
use crate::models::Feed;
use crate::options::{ClientBuilder, Options};
use crate::query::Query;
use crate::sanitize;
use crate::title;

/// Runs extraction requests. A single client serves any number of sequential
/// [`Client::run`] calls, and its cache is shared between them.
#[derive(Debug)]
pub struct Client {
    fetcher: PageFetcher,
}

impl Client {
    /// Starts building a client with default options.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn new(opts: Options) -> Result<Client, ExtractError> {
        let cache = cache::create_cache(&opts.cache)?;
        let http = match opts.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(opts.user_agent.clone())
                .timeout(opts.timeout)
                .build()
                .map_err(|e| ExtractError::config(format!("failed to build HTTP client: {e}")))?,
        };
        Ok(Client {
            fetcher: PageFetcher::new(http, cache, opts.cache_ttl),
        })
    }

    /// Runs one extraction request to completion.
    ///
    /// Pipeline: fetch the index page (never cached), resolve its links to
    /// absolute form, capture the feed title, extract candidate entries,
    /// filter and limit their URLs, then (only when a content selector was
    /// given) expand each surviving entry sequentially. The first error at
    /// any stage aborts the whole request; there is no partial output.
    pub async fn run(&self, query: &Query) -> Result<Feed, ExtractError> {
        let home = query.validate()?;

        let page = self.fetcher.fetch(home.as_str()).await?;
        sanitize::absolutize(&page, &home);

        let feed_title = title::page_title(&page, query.title_cleanup.as_deref());
        debug!(title = %feed_title, "index page fetched");

        let candidates = extract::find_entries(
            &page,
            &home,
            &query.url_selector,
            query.content_cleanup.as_deref(),
        )?;
        let urls: Vec<String> = candidates.keys().cloned().collect();
        let surviving = filter::filter_urls(&urls, query.url_pattern.as_deref(), query.limit)?;
        debug!(
            candidates = candidates.len(),
            surviving = surviving.len(),
            "entries extracted"
        );

        let mut entries = Vec::with_capacity(surviving.len());
        match query.content_selector.as_deref() {
            None => {
                for url in &surviving {
                    let Some(entry) = candidates.get(url) else {
                        continue;
                    };
                    entries.push(entry.clone());
                }
            }
            Some(content_selector) => {
                // Sequential by design: one fetch in flight per request.
                for url in &surviving {
                    let Some(candidate) = candidates.get(url) else {
                        continue;
                    };
                    let expanded = expand::expand_entry(
                        &self.fetcher,
                        url,
                        content_selector,
                        query.content_cleanup.as_deref(),
                        query.title_cleanup.as_deref(),
                        &candidate.title,
                        &feed_title,
                    )
                    .await?;
                    entries.push(expanded);
                }
            }
        }

        Ok(Feed {
            uri: home.into(),
            title: feed_title,
            entries,
        })
    }
}
