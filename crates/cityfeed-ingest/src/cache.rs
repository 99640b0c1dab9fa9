//! Response caching
//!
//! Caches parsed response bodies keyed by request URL to bound outbound
//! call volume to at most one live fetch per URL per TTL window. Purely
//! time-based: there is no request coalescing, and failures are never
//! stored, so a failed fetch does not poison the window.

use crate::parse::ParsedBody;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// One cached response; replaced wholesale on refresh, never mutated
struct CacheEntry {
    body: ParsedBody,
    expires_at: Instant,
}

/// In-memory TTL cache of parsed bodies, keyed by URL
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    /// Create a cache with a process-wide TTL
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return a live entry for `url`, dropping it if it has expired
    pub fn get(&mut self, url: &str) -> Option<ParsedBody> {
        match self.entries.get(url) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(url = %url, "Cache hit");
                Some(entry.body.clone())
            },
            Some(_) => {
                debug!(url = %url, "Cache entry expired");
                self.entries.remove(url);
                None
            },
            None => {
                debug!(url = %url, "Cache miss");
                None
            },
        }
    }

    /// Store a parsed body for `url`, expiring `ttl` from now
    pub fn insert(&mut self, url: impl Into<String>, body: ParsedBody) {
        self.entries.insert(
            url.into(),
            CacheEntry {
                body,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of entries currently held (live or expired)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry
    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}
