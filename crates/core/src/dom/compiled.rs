// ABOUTME: Thread-safe cache of compiled CSS selectors.
// ABOUTME: Each selector string is parsed once; invalid selectors cache as None.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::Matcher;
use once_cell::sync::Lazy;

static MATCHER_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selectors that fail to parse; the failure is cached too,
/// so a bad selector is only parsed once per process.
pub(crate) fn get_or_compile(css: &str) -> Option<Matcher> {
    {
        let cache = MATCHER_CACHE.read().unwrap();
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = MATCHER_CACHE.write().unwrap();
    // Another thread may have inserted while we compiled.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selector_compiles_and_caches() {
        assert!(get_or_compile("div.teaser > a").is_some());
        assert!(get_or_compile("div.teaser > a").is_some());
    }

    #[test]
    fn invalid_selector_returns_none() {
        assert!(get_or_compile("[[[nope").is_none());
        assert!(get_or_compile("[[[nope").is_none());
    }
}
