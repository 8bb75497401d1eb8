//! # lodestone-retrieval
//!
//! The retrieval half of the lodestone engine: the static domain knowledge
//! base, query ranking, the TTL context cache, the bounded history log, and
//! the `ContextEngine` facade that ties them to the semantic index.

pub mod cache;
pub mod domains;
pub mod engine;
pub mod history;
pub mod ranking;
pub mod types;

pub use cache::{CacheStats, ContextCache};
pub use domains::{DomainKnowledge, DomainKnowledgeBase};
pub use engine::ContextEngine;
pub use history::HistoryLog;
pub use types::{DomainMatch, EnhancedContext, HistoricalContext, RetrievalOptions, SemanticMatch};
