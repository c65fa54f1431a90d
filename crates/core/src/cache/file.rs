// ABOUTME: Disk-backed cache storing one file per key under a configured directory.
// ABOUTME: Files carry an 8-byte expiry header; prerequisites are validated at construction.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};
use tracing::warn;

use super::Cache;
use crate::error::ExtractError;

/// File layout: 8 big-endian bytes of unix-seconds expiry (0 = no expiry),
/// then the payload.
const HEADER_LEN: usize = 8;

/// Cache backend persisting entries under a directory, one file per key.
///
/// The directory must already exist and be writable; both are checked in
/// [`FileCache::new`] so misconfiguration fails at startup.
#[derive(Debug)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ExtractError::config(format!(
                "the file cache path does not exist: {}",
                root.display()
            )));
        }
        // Probe writability up front instead of failing on the first set().
        let probe = root.join(".siftfeed-write-probe");
        fs::write(&probe, b"").map_err(|e| {
            ExtractError::config(format!(
                "the file cache path is not writable: {}: {e}",
                root.display()
            ))
        })?;
        let _ = fs::remove_file(&probe);
        Ok(Self { root })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.root.join(format!("{}.page", hex::encode(digest)))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        let raw = fs::read(&path).ok()?;
        if raw.len() < HEADER_LEN {
            let _ = fs::remove_file(&path);
            return None;
        }
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&raw[..HEADER_LEN]);
        let expires_at = u64::from_be_bytes(header);
        if expires_at != 0 && unix_now() >= expires_at {
            let _ = fs::remove_file(&path);
            return None;
        }
        Some(raw[HEADER_LEN..].to_vec())
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| unix_now() + ttl.as_secs()).unwrap_or(0);
        let mut raw = Vec::with_capacity(HEADER_LEN + value.len());
        raw.extend_from_slice(&expires_at.to_be_bytes());
        raw.extend_from_slice(value);
        let path = self.entry_path(key);
        if let Err(e) = fs::write(&path, raw) {
            warn!(path = %path.display(), error = %e, "failed to write cache entry");
        }
    }
}
