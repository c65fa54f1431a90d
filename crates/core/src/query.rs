// ABOUTME: Per-request parameter bag for one extraction, with early validation.
// ABOUTME: Built once, never mutated by the pipeline; setters normalize empty strings to None.

use regex::Regex;
use url::Url;

use crate::error::ExtractError;

/// Parameters for one extraction request.
///
/// `home_page` and `url_selector` are required; everything else is optional.
/// The default `limit` is 10 entries; use [`Query::no_limit`] to lift it.
#[derive(Debug, Clone)]
pub struct Query {
    pub home_page: String,
    pub url_selector: String,
    pub url_pattern: Option<String>,
    pub content_selector: Option<String>,
    pub content_cleanup: Option<String>,
    pub title_cleanup: Option<String>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(home_page: impl Into<String>, url_selector: impl Into<String>) -> Self {
        Self {
            home_page: home_page.into(),
            url_selector: url_selector.into(),
            url_pattern: None,
            content_selector: None,
            content_cleanup: None,
            title_cleanup: None,
            limit: Some(10),
        }
    }

    /// Regex applied to candidate URLs; only matching entries are kept.
    pub fn url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = non_empty(pattern.into());
        self
    }

    /// Selector for full-article expansion. When set, each surviving entry is
    /// re-fetched and its summary replaced with the selected content.
    pub fn content_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = non_empty(selector.into());
        self
    }

    /// Selector for elements to strip from extracted content.
    pub fn content_cleanup(mut self, selector: impl Into<String>) -> Self {
        self.content_cleanup = non_empty(selector.into());
        self
    }

    /// Literal text removed from page titles, e.g. `" | BlogName"`.
    pub fn title_cleanup(mut self, text: impl Into<String>) -> Self {
        self.title_cleanup = non_empty(text.into());
        self
    }

    /// Maximum number of entries in the output.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Removes the entry limit.
    pub fn no_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Validates the request up front: the home page must parse as a URL, the
    /// url selector must be present, and the pattern (when given) must be a
    /// valid regex. Returns the parsed home-page URL, which doubles as the
    /// base for resolving relative links.
    pub(crate) fn validate(&self) -> Result<Url, ExtractError> {
        if self.url_selector.trim().is_empty() {
            return Err(ExtractError::config("url_selector must not be empty"));
        }
        if let Some(pattern) = &self.url_pattern {
            Regex::new(pattern).map_err(|e| {
                ExtractError::config(format!("invalid url_pattern {pattern:?}: {e}"))
            })?;
        }
        Url::parse(&self.home_page).map_err(|e| {
            ExtractError::config(format!("invalid home page URL {:?}: {e}", self.home_page))
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
