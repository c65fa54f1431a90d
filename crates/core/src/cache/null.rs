// ABOUTME: No-op cache backend: never stores, never hits.

use std::time::Duration;

use super::Cache;

/// Cache that caches nothing. Useful for debugging selectors against pages
/// that change between fetches.
#[derive(Debug)]
pub struct NullCache;

impl Cache for NullCache {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_returns_a_hit() {
        let cache = NullCache;
        cache.set("k", b"value", None);
        assert!(cache.get("k").is_none());
    }
}
