//! Query-time data model: options, matches, and the enhanced context.

use std::time::SystemTime;

use lodestone_analysis::lexical::{Concept, Symbol};
use serde::{Deserialize, Serialize};

/// Per-call overrides for the retrieval limits.
///
/// Unset fields fall back to the engine configuration. Options are part of
/// the cache key, so two calls with different options never share an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalOptions {
    pub max_semantic_matches: Option<usize>,
    pub max_domain_matches: Option<usize>,
    pub max_suggestions: Option<usize>,
}

/// One scored file from the semantic index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub file_path: String,
    pub score: f64,
    pub matched_symbols: Vec<Symbol>,
    pub matched_concepts: Vec<Concept>,
}

/// One scored domain from the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMatch {
    pub domain: String,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

/// One consumed retrieval outcome, appended by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalContext {
    pub timestamp: SystemTime,
    pub query: String,
    pub result_summary: String,
    pub files_referenced: Vec<String>,
    pub context_used: bool,
}

/// The ranked, multi-source result of a single retrieval query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedContext {
    pub query: String,
    pub semantic_matches: Vec<SemanticMatch>,
    /// Matched files plus their direct imports and up to 3 dependents each.
    pub related_code: Vec<String>,
    pub domain_context: Vec<DomainMatch>,
    pub historical_context: Vec<HistoricalContext>,
    pub suggestions: Vec<String>,
    /// Aggregate confidence in [0, 1].
    pub confidence: f64,
}
