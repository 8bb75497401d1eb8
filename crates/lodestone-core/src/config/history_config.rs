//! Historical tracking configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the query history log.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whether consumed results are tracked at all. Default: true.
    pub enable_historical_tracking: Option<bool>,
    /// Most recent entries kept; oldest dropped first. Default: 100.
    pub max_history_entries: Option<usize>,
}

impl HistoryConfig {
    /// Effective tracking toggle, defaulting to enabled.
    pub fn effective_enable_historical_tracking(&self) -> bool {
        self.enable_historical_tracking.unwrap_or(true)
    }

    /// Effective history bound, defaulting to 100 entries.
    pub fn effective_max_history_entries(&self) -> usize {
        self.max_history_entries.unwrap_or(100)
    }
}
