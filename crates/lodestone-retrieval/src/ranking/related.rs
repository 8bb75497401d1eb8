//! Related-code expansion through the relationship graph.

use lodestone_analysis::graph::RelationshipGraph;
use lodestone_core::types::collections::FxHashSet;

use crate::types::SemanticMatch;

/// How many dependents each matched file may contribute.
const MAX_DEPENDENTS_PER_MATCH: usize = 3;

/// Union of the matched files, each match's direct imports, and up to 3 of
/// each match's dependents, deduplicated in first-occurrence order.
pub fn expand_related(matches: &[SemanticMatch], graph: &RelationshipGraph) -> Vec<String> {
    let mut related: Vec<String> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for m in matches {
        push_unique(&mut related, &mut seen, &m.file_path);
    }
    for m in matches {
        if let Some(relationship) = graph.get(&m.file_path) {
            for import in &relationship.imports {
                push_unique(&mut related, &mut seen, import);
            }
            for dependent in relationship.dependents.iter().take(MAX_DEPENDENTS_PER_MATCH) {
                push_unique(&mut related, &mut seen, dependent);
            }
        }
    }

    related
}

fn push_unique(out: &mut Vec<String>, seen: &mut FxHashSet<String>, path: &str) {
    if seen.insert(path.to_string()) {
        out.push(path.to_string());
    }
}
