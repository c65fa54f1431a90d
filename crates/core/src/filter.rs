// ABOUTME: Candidate URL filtering: optional regex pattern plus a result-count limit.
// ABOUTME: Order-preserving; an empty result is a NoMatch failure, not an empty feed.

use regex::Regex;

use crate::error::ExtractError;

/// Filters candidate URLs by an optional regex and truncates to `limit`.
///
/// The pattern string is compiled as-is: the `regex` crate has no delimiter
/// syntax, so unlike delimiter-wrapped regex dialects nothing needs escaping
/// by the caller. A pattern that fails to compile is a configuration error.
/// The pattern matches anywhere in the URL. Input order is preserved and the
/// limited output is a prefix of the filtered sequence.
pub fn filter_urls(
    urls: &[String],
    pattern: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<String>, ExtractError> {
    let mut kept: Vec<String> = match pattern {
        Some(pattern) if !pattern.is_empty() => {
            let re = Regex::new(pattern).map_err(|e| {
                ExtractError::config(format!("invalid url_pattern {pattern:?}: {e}"))
            })?;
            urls.iter().filter(|url| re.is_match(url)).cloned().collect()
        }
        _ => urls.to_vec(),
    };

    if let Some(limit) = limit {
        if kept.len() > limit {
            kept.truncate(limit);
        }
    }

    if kept.is_empty() {
        return Err(ExtractError::NoMatch("url_pattern"));
    }
    Ok(kept)
}
