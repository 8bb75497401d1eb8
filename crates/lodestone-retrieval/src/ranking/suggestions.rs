//! Follow-up suggestion generation.
//!
//! Priority order: the top semantic match's symbols, its relationships, the
//! top domain match's best practice and pattern, then the most recent
//! relevant history entry. Truncated to the configured cap.

use lodestone_analysis::graph::RelationshipGraph;

use crate::domains::DomainKnowledgeBase;
use crate::types::{DomainMatch, HistoricalContext, SemanticMatch};

pub fn build_suggestions(
    semantic: &[SemanticMatch],
    graph: &RelationshipGraph,
    knowledge_base: &DomainKnowledgeBase,
    domains: &[DomainMatch],
    history: &[HistoricalContext],
    max_suggestions: usize,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    if let Some(top) = semantic.first() {
        if let Some(symbol) = top.matched_symbols.first() {
            suggestions.push(format!(
                "Explain how `{}` in {} works",
                symbol.name, top.file_path
            ));
        }
        if let Some(relationship) = graph.get(&top.file_path) {
            if !relationship.dependents.is_empty() {
                suggestions.push(format!(
                    "Review the {} file(s) that depend on {}",
                    relationship.dependents.len(),
                    top.file_path
                ));
            } else if !relationship.imports.is_empty() {
                suggestions.push(format!("Trace the imports of {}", top.file_path));
            }
        }
    }

    if let Some(top_domain) = domains.first() {
        if let Some(domain) = knowledge_base.get(&top_domain.domain) {
            if let Some(best_practice) = domain.best_practices.first() {
                suggestions.push(format!(
                    "Apply the {} best practice: {}",
                    domain.name, best_practice
                ));
            }
            if let Some(pattern) = domain.patterns.first() {
                suggestions.push(format!(
                    "Check for the {} pattern in the matched files",
                    pattern
                ));
            }
        }
    }

    if let Some(entry) = history.first() {
        suggestions.push(format!("Revisit the earlier query \"{}\"", entry.query));
    }

    suggestions.truncate(max_suggestions);
    suggestions
}
