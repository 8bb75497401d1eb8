//! Context cache: TTL map with a capacity-triggered expired sweep.
//!
//! `get` never returns an expired entry (and removes one it finds); `set`
//! stamps `expires_at = now + ttl`. When the map exceeds
//! [`SWEEP_THRESHOLD`] entries, a sweep removes everything already expired.
//! This is a sweep, not LRU: live entries are never evicted early, so the
//! map can grow without bound between sweeps when the TTL is long. That
//! trade-off is deliberate; see DESIGN.md before "fixing" it.

use std::time::{Duration, Instant};

use lodestone_core::types::collections::FxHashMap;

use crate::types::{EnhancedContext, RetrievalOptions};

/// Entry count above which an insert triggers an expired sweep.
const SWEEP_THRESHOLD: usize = 100;

struct CacheEntry {
    context: EnhancedContext,
    expires_at: Instant,
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizes retrieval results per normalized query + options.
pub struct ContextCache {
    entries: FxHashMap<String, CacheEntry>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl ContextCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: FxHashMap::default(),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Cache key: whitespace-collapsed lowercase query plus the serialized
    /// options, so differing limits never share an entry.
    pub fn cache_key(query: &str, options: &RetrievalOptions) -> String {
        let normalized = query
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let options_json = serde_json::to_string(options).unwrap_or_default();
        format!("{normalized}|{options_json}")
    }

    /// Fresh entry or nothing; an expired entry found here is removed.
    pub fn get(&mut self, key: &str) -> Option<EnhancedContext> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => {
                self.hits += 1;
                return Some(entry.context.clone());
            }
            Some(_) => true,
            None => false,
        };
        self.misses += 1;
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store (overwriting any previous entry) and sweep if over capacity.
    pub fn insert(&mut self, key: String, context: EnhancedContext) {
        let expires_at = Instant::now() + self.ttl;
        self.entries.insert(
            key,
            CacheEntry {
                context,
                expires_at,
            },
        );
        if self.entries.len() > SWEEP_THRESHOLD {
            self.sweep_expired();
        }
    }

    /// Remove every entry whose expiry has passed.
    pub fn sweep_expired(&mut self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "cache sweep");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
