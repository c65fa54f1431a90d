// ABOUTME: In-process cache backend backed by a mutex-guarded map.
// ABOUTME: Expiry is checked lazily on read; expired entries are dropped then.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::Cache;

#[derive(Debug)]
struct Slot {
    expires_at: Option<Instant>,
    data: Vec<u8>,
}

/// Process-local cache. The default backend: fast, shared between requests
/// on the same client, gone when the process exits.
#[derive(Debug)]
pub struct MemoryCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut slots = self.slots.lock().unwrap();
        match slots.get(key) {
            Some(slot) => {
                if slot.expires_at.is_some_and(|at| Instant::now() >= at) {
                    slots.remove(key);
                    None
                } else {
                    Some(slot.data.clone())
                }
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let slot = Slot {
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
            data: value.to_vec(),
        };
        self.slots.lock().unwrap().insert(key.to_string(), slot);
    }
}
