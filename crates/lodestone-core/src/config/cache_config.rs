//! Context cache configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the context cache.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether retrieval results are cached at all. Default: true.
    pub enable_caching: Option<bool>,
    /// Entry time-to-live in milliseconds. Default: 300 000 (5 minutes).
    pub cache_expiration_ms: Option<u64>,
}

impl CacheConfig {
    /// Effective caching toggle, defaulting to enabled.
    pub fn effective_enable_caching(&self) -> bool {
        self.enable_caching.unwrap_or(true)
    }

    /// Effective TTL in milliseconds, defaulting to 5 minutes.
    pub fn effective_cache_expiration_ms(&self) -> u64 {
        self.cache_expiration_ms.unwrap_or(300_000)
    }
}
