// ABOUTME: Entry expansion: re-fetch an entry's own page and replace its summary
// ABOUTME: with full article content, with title fallback to the index-page anchor text.

use tracing::debug;
use url::Url;

use crate::error::ExtractError;
use crate::fetch::PageFetcher;
use crate::models::Entry;
use crate::sanitize;
use crate::title;

/// Fetches `entry_uri` through the cache and builds a fresh entry from it.
///
/// The first `content_selector` match becomes the article body (its full
/// outer markup, sanitized against the entry URL). The entry title is the
/// fetched page's own title unless that is empty or identical to
/// `feed_title`: a page reusing the site-wide title tag tells us nothing, so
/// the anchor text captured from the index page (`fallback_title`) wins when
/// it is non-empty. The candidate entry from extraction is never mutated;
/// callers replace it wholesale with the returned one.
pub async fn expand_entry(
    fetcher: &PageFetcher,
    entry_uri: &str,
    content_selector: &str,
    content_cleanup: Option<&str>,
    title_cleanup: Option<&str>,
    fallback_title: &str,
    feed_title: &str,
) -> Result<Entry, ExtractError> {
    // The pipeline only calls this when a content selector was supplied;
    // hitting this with an empty one is a caller bug surfaced loudly.
    if content_selector.is_empty() {
        return Err(ExtractError::MissingSelector);
    }

    debug!(url = entry_uri, "expanding entry");
    let page = fetcher.fetch_cached(entry_uri).await?;

    let matches = page.find(content_selector)?;
    let Some(body) = matches.first() else {
        return Err(ExtractError::ContentNotFound(entry_uri.to_string()));
    };

    let content_base = Url::parse(entry_uri)
        .map_err(|e| ExtractError::fetch(entry_uri, format!("invalid entry URL: {e}")))?;
    let content =
        sanitize::sanitize_fragment(&body.outer_markup(), &content_base, content_cleanup)?;

    let mut entry_title = title::page_title(&page, title_cleanup);
    if !fallback_title.is_empty() && (entry_title.is_empty() || entry_title == feed_title) {
        entry_title = fallback_title.to_string();
    }

    Ok(Entry {
        uri: entry_uri.to_string(),
        title: entry_title,
        content: Some(content),
    })
}
