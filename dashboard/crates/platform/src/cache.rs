//! Response Cache Infrastructure
//!
//! A small key/value cache with per-entry time-to-live, behind the
//! [`ResponseCache`] interface so call sites can swap in [`NoopCache`] or a
//! shared implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;

use crate::clock::{Clock, SystemClock};

/// Cached payload with its creation time and TTL
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    /// Creation time (Unix timestamp ms)
    pub created_at_ms: i64,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Stale once strictly more than `ttl` has elapsed since creation
    pub fn is_stale(&self, now_ms: i64) -> bool {
        now_ms - self.created_at_ms > self.ttl.as_millis() as i64
    }
}

/// Trait for response cache backends
pub trait ResponseCache: Send + Sync {
    /// Live value for `key`; stale entries are treated as absent
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Remove the entry equal to `key_or_prefix` and every entry whose key
    /// starts with it. Returns the number of removed entries.
    fn invalidate(&self, key_or_prefix: &str) -> usize;

    fn clear(&self);

    /// Number of stored entries (stale ones included until the next write)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process cache backed by a map
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Entries are replaced whole, so a poisoned map is still consistent
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now_ms = self.clock.now_ms();
        let mut entries = self.entries();

        match entries.get(key) {
            Some(entry) if entry.is_stale(now_ms) => {
                entries.remove(key);
                tracing::debug!(key = %key, "Cache entry expired");
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Stores `value` and drops every other stale entry
    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let now_ms = self.clock.now_ms();
        let mut entries = self.entries();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale(now_ms));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Stale cache entries dropped");
        }

        let entry = CacheEntry {
            value,
            created_at_ms: now_ms,
            ttl,
        };
        entries.insert(key.to_string(), entry);
    }

    fn invalidate(&self, key_or_prefix: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(key_or_prefix));
        let removed = before - entries.len();

        if removed > 0 {
            tracing::debug!(pattern = %key_or_prefix, removed, "Cache entries invalidated");
        }
        removed
    }

    fn clear(&self) {
        self.entries().clear();
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl ResponseCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _key: &str, _value: Value, _ttl: Duration) {}

    fn invalidate(&self, _key_or_prefix: &str) -> usize {
        0
    }

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}
