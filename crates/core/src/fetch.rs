// ABOUTME: Page fetching: HTTP retrieval, charset decoding, and the cache-backed path.
// ABOUTME: Index pages are always fetched fresh; entry expansions go through the cache.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::cache::Cache;
use crate::dom::Page;
use crate::error::ExtractError;

/// Maximum allowed response body (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Resolves URLs to parsed pages.
///
/// Two paths: [`PageFetcher::fetch`] always hits the network (used for the
/// index page, which should reflect the latest state of the site), and
/// [`PageFetcher::fetch_cached`] consults the cache first (used for entry
/// expansion, where the same article pages recur across feed refreshes).
/// Timeout policy lives on the HTTP client, not here.
#[derive(Debug)]
pub struct PageFetcher {
    http: reqwest::Client,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
}

impl PageFetcher {
    pub fn new(http: reqwest::Client, cache: Arc<dyn Cache>, cache_ttl: Duration) -> Self {
        Self {
            http,
            cache,
            cache_ttl,
        }
    }

    /// Fetches and parses a page, bypassing the cache.
    pub async fn fetch(&self, url: &str) -> Result<Page, ExtractError> {
        let html = self.fetch_html(url).await?;
        Ok(Page::parse(&html))
    }

    /// Fetches and parses a page through the cache. Stores the decoded HTML
    /// on a miss so later hits skip both the network and charset detection.
    pub async fn fetch_cached(&self, url: &str) -> Result<Page, ExtractError> {
        if let Some(bytes) = self.cache.get(url) {
            if let Ok(html) = String::from_utf8(bytes) {
                debug!(url, "cache hit");
                return Ok(Page::parse(&html));
            }
        }
        let html = self.fetch_html(url).await?;
        self.cache.set(url, html.as_bytes(), Some(self.cache_ttl));
        Ok(Page::parse(&html))
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        let parsed =
            Url::parse(url).map_err(|e| ExtractError::fetch(url, format!("invalid URL: {e}")))?;
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ExtractError::fetch(url, "scheme must be http or https"));
        }

        debug!(url, "fetching page");
        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| ExtractError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::fetch(url, format!("HTTP status {}", status.as_u16())));
        }

        // Reject oversized bodies from the header when the server declares one.
        if let Some(len) = response.content_length() {
            if len as usize > MAX_CONTENT_LENGTH {
                return Err(ExtractError::fetch(url, "content too large"));
            }
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractError::fetch(url, format!("failed to read body: {e}")))?;
        if body.len() > MAX_CONTENT_LENGTH {
            return Err(ExtractError::fetch(url, "content too large"));
        }

        Ok(decode_body(&body, content_type.as_deref()))
    }
}

/// Decodes body bytes using the content-type charset when declared, falling
/// back to statistical detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(extract_charset) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Pulls the charset parameter out of a Content-Type header value.
fn extract_charset(content_type: &str) -> Option<String> {
    for part in content_type.split(';') {
        if let Some(charset) = part.trim().strip_prefix("charset=") {
            return Some(charset.trim_matches('"').trim_matches('\'').to_string());
        }
    }
    None
}
