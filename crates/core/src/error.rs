// ABOUTME: Error types for the extraction pipeline.
// ABOUTME: Provides the ExtractError enum with constructors and boolean helpers.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while turning a page into feed entries.
///
/// Every variant is terminal for the current request: the pipeline does not
/// retry and never returns partial output.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selector stage produced zero results. Carries the stage name,
    /// `"url_selector"` or `"url_pattern"`.
    #[error("no results for {0}")]
    NoMatch(&'static str),

    /// Entry expansion was requested without a content selector.
    #[error("a content selector is required to expand entries")]
    MissingSelector,

    /// The content selector matched nothing on an expanded page.
    #[error("could not find content at {0}")]
    ContentNotFound(String),

    /// The underlying retrieval failed. The reason is passed through from the
    /// fetch layer unmodified; no transient/permanent distinction is made here.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Invalid request parameters or a misconfigured cache backend.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Creates a Fetch error from any displayable cause.
    pub fn fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        ExtractError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Config error with a custom message.
    pub fn config(msg: impl Into<String>) -> Self {
        ExtractError::Config(msg.into())
    }

    /// Returns true if this is a NoMatch error.
    pub fn is_no_match(&self) -> bool {
        matches!(self, ExtractError::NoMatch(_))
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ExtractError::Fetch { .. })
    }

    /// Returns true if this is a Config error.
    pub fn is_config(&self) -> bool {
        matches!(self, ExtractError::Config(_))
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_names_the_stage() {
        let err = ExtractError::NoMatch("url_selector");
        assert_eq!(err.to_string(), "no results for url_selector");
        assert!(err.is_no_match());
    }

    #[test]
    fn fetch_keeps_the_underlying_reason() {
        let err = ExtractError::fetch("https://example.com/a", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.com/a: HTTP status 503"
        );
        assert!(err.is_fetch());
    }

    #[test]
    fn content_not_found_carries_the_url() {
        let err = ExtractError::ContentNotFound("https://example.com/a".into());
        assert!(err.to_string().contains("https://example.com/a"));
    }
}
