// ABOUTME: Cache interface consumed by the page fetcher, plus the backend registry.
// ABOUTME: Backends resolve from a fixed name table at construction time, never at first use.

//! URL-keyed byte cache.
//!
//! The fetcher stores decoded page HTML here so that expanding several entries
//! of the same feed (or re-running a request shortly after) does not re-fetch
//! identical pages. Expiry is owned entirely by the backend; callers only pass
//! an optional TTL hint on write.

mod file;
mod memory;
mod null;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ExtractError;

pub use file::FileCache;
pub use memory::MemoryCache;
pub use null::NullCache;

/// Key/value store keyed by URL.
///
/// Implementations must support concurrent reads and writes with no cross-key
/// interference; a single extraction request never races itself.
pub trait Cache: Send + Sync + std::fmt::Debug {
    /// Returns the cached value for `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key`. `ttl` of `None` means no expiry.
    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>);
}

/// Which cache backend to construct, and its prerequisites.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Backend name: `memory`, `file`, or `null`. Matching is
    /// case-insensitive and tolerates a trailing `cache` suffix
    /// (`FileCache` resolves to `file`).
    pub backend: String,
    /// Storage directory, required by the `file` backend.
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            path: None,
        }
    }
}

type BackendCtor = fn(&CacheConfig) -> Result<Arc<dyn Cache>, ExtractError>;

/// The fixed set of known backends. Adding a backend means adding a row here;
/// nothing is resolved dynamically.
const BACKENDS: &[(&str, BackendCtor)] = &[
    ("memory", new_memory),
    ("file", new_file),
    ("null", new_null),
];

fn new_memory(_cfg: &CacheConfig) -> Result<Arc<dyn Cache>, ExtractError> {
    Ok(Arc::new(MemoryCache::new()))
}

fn new_file(cfg: &CacheConfig) -> Result<Arc<dyn Cache>, ExtractError> {
    let path = cfg
        .path
        .as_ref()
        .ok_or_else(|| ExtractError::config("the file cache backend requires a storage path"))?;
    Ok(Arc::new(FileCache::new(path)?))
}

fn new_null(_cfg: &CacheConfig) -> Result<Arc<dyn Cache>, ExtractError> {
    Ok(Arc::new(NullCache))
}

/// Normalizes a configured backend name: lowercase, trailing `cache` trimmed.
fn normalize_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    match lower.strip_suffix("cache") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}

/// Resolves a [`CacheConfig`] to a constructed backend.
///
/// Unknown names and unmet prerequisites (e.g. a missing or unwritable file
/// cache directory) fail here with [`ExtractError::Config`], so a
/// misconfiguration surfaces at client construction rather than mid-request.
pub fn create_cache(cfg: &CacheConfig) -> Result<Arc<dyn Cache>, ExtractError> {
    let name = normalize_name(&cfg.backend);
    for (known, ctor) in BACKENDS {
        if *known == name {
            return ctor(cfg);
        }
    }
    let known: Vec<&str> = BACKENDS.iter().map(|(n, _)| *n).collect();
    Err(ExtractError::config(format!(
        "unknown cache backend {:?} (expected one of: {})",
        cfg.backend,
        known.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_backends() {
        assert!(create_cache(&CacheConfig::default()).is_ok());
        let null = CacheConfig {
            backend: "null".into(),
            path: None,
        };
        assert!(create_cache(&null).is_ok());
    }

    #[test]
    fn name_matching_is_lenient() {
        assert_eq!(normalize_name("Memory"), "memory");
        assert_eq!(normalize_name("FileCache"), "file");
        assert_eq!(normalize_name("NULLCACHE"), "null");
        // A bare "cache" is not a backend name, so the suffix stays.
        assert_eq!(normalize_name("cache"), "cache");
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let cfg = CacheConfig {
            backend: "redis".into(),
            path: None,
        };
        let err = create_cache(&cfg).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn file_backend_requires_a_path() {
        let cfg = CacheConfig {
            backend: "file".into(),
            path: None,
        };
        let err = create_cache(&cfg).unwrap_err();
        assert!(err.is_config());
    }
}
