//! Retrieval and ranking configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the retrieval & ranking stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum semantic matches returned per query. Default: 10.
    pub max_semantic_matches: Option<usize>,
    /// Maximum domain matches returned per query. Default: 5.
    pub max_domain_matches: Option<usize>,
    /// Maximum follow-up suggestions generated per query. Default: 5.
    pub max_suggestions: Option<usize>,
}

impl RetrievalConfig {
    /// Effective semantic-match cap, defaulting to 10.
    pub fn effective_max_semantic_matches(&self) -> usize {
        self.max_semantic_matches.unwrap_or(10)
    }

    /// Effective domain-match cap, defaulting to 5.
    pub fn effective_max_domain_matches(&self) -> usize {
        self.max_domain_matches.unwrap_or(5)
    }

    /// Effective suggestion cap, defaulting to 5.
    pub fn effective_max_suggestions(&self) -> usize {
        self.max_suggestions.unwrap_or(5)
    }
}
