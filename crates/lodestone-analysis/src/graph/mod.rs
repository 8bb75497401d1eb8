//! Relationship graph over local import edges.
//!
//! Rebuilt from scratch on every call; never incrementally patched. The
//! forward pass establishes `imports`, a reverse pass fills `dependents`,
//! and weights are computed last, once every edge is final. Symmetry
//! (A imports B implies B's dependents contain A) holds by construction.

pub mod resolution;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::SemanticIndex;
use crate::lexical::Export;
use resolution::resolve_specifier;

/// Import/export relationships of one indexed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeRelationship {
    /// Resolved local imports, in dependency-declaration order.
    pub imports: Vec<String>,
    pub exports: Vec<Export>,
    /// Files that import this one.
    pub dependents: Vec<String>,
    /// 2·|imports| + |exports| + 3·|dependents|.
    pub weight: u32,
}

/// Directed graph over indexed files, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    relationships: BTreeMap<String, CodeRelationship>,
}

impl RelationshipGraph {
    /// Build the full graph from the current index contents.
    pub fn build(index: &SemanticIndex) -> Self {
        let mut relationships: BTreeMap<String, CodeRelationship> = index
            .iter()
            .map(|(path, analysis)| {
                (
                    path.clone(),
                    CodeRelationship {
                        exports: analysis.exports.clone(),
                        ..Default::default()
                    },
                )
            })
            .collect();

        // Forward pass: resolve local specifiers into import edges.
        // Unresolvable dependencies are dropped here, silently.
        let mut edge_count = 0usize;
        for (path, analysis) in index.iter() {
            for dependency in analysis.local_dependencies() {
                let Some(target) = resolve_specifier(path, &dependency.specifier, index) else {
                    continue;
                };
                if &target == path {
                    continue;
                }
                if let Some(relationship) = relationships.get_mut(path) {
                    if !relationship.imports.contains(&target) {
                        relationship.imports.push(target);
                        edge_count += 1;
                    }
                }
            }
        }

        // Reverse pass: every import edge contributes one dependent.
        let mut reverse: Vec<(String, String)> = Vec::new();
        for (path, relationship) in &relationships {
            for import in &relationship.imports {
                reverse.push((import.clone(), path.clone()));
            }
        }
        for (target, dependent) in reverse {
            if let Some(relationship) = relationships.get_mut(&target) {
                if !relationship.dependents.contains(&dependent) {
                    relationship.dependents.push(dependent);
                }
            }
        }

        // Weights last, once imports/exports/dependents are final.
        for relationship in relationships.values_mut() {
            relationship.weight = (2 * relationship.imports.len()
                + relationship.exports.len()
                + 3 * relationship.dependents.len()) as u32;
        }

        tracing::debug!(
            nodes = relationships.len(),
            edges = edge_count,
            "relationship graph rebuilt"
        );
        Self { relationships }
    }

    pub fn get(&self, path: &str) -> Option<&CodeRelationship> {
        self.relationships.get(path)
    }

    /// Relationships in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CodeRelationship)> {
        self.relationships.iter()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::StaticFileEnumerator;
    use lodestone_core::traits::CancellationToken;

    fn graph_of(files: &[(&str, &str)]) -> RelationshipGraph {
        let mut enumerator = StaticFileEnumerator::new();
        for (path, content) in files {
            enumerator = enumerator.add(*path, *content);
        }
        let mut index = SemanticIndex::new().unwrap();
        index.build(&enumerator, &CancellationToken::new()).unwrap();
        RelationshipGraph::build(&index)
    }

    #[test]
    fn import_edge_creates_symmetric_dependent() {
        let graph = graph_of(&[
            ("a.ts", "import { v } from './b';"),
            ("b.ts", "export const v = 1;"),
        ]);
        let a = graph.get("a.ts").unwrap();
        let b = graph.get("b.ts").unwrap();
        assert_eq!(a.imports, vec!["b.ts"]);
        assert_eq!(b.dependents, vec!["a.ts"]);
    }

    #[test]
    fn weight_formula_is_exact() {
        let graph = graph_of(&[
            ("a.ts", "import { v } from './b';\nimport { w } from './c';"),
            ("b.ts", "export const v = 1;\nexport const v2 = 2;"),
            ("c.ts", "export const w = 1;"),
        ]);
        for (_, relationship) in graph.iter() {
            assert_eq!(
                relationship.weight as usize,
                2 * relationship.imports.len()
                    + relationship.exports.len()
                    + 3 * relationship.dependents.len()
            );
        }
        // a: 2 imports, 0 exports, 0 dependents
        assert_eq!(graph.get("a.ts").unwrap().weight, 4);
        // b: 0 imports, 2 exports, 1 dependent
        assert_eq!(graph.get("b.ts").unwrap().weight, 5);
    }

    #[test]
    fn unresolvable_imports_are_dropped() {
        let graph = graph_of(&[("a.ts", "import { x } from './missing';")]);
        assert!(graph.get("a.ts").unwrap().imports.is_empty());
    }

    #[test]
    fn external_and_builtin_deps_never_become_edges() {
        let graph = graph_of(&[(
            "a.ts",
            "import fs from 'fs';\nimport express from 'express';",
        )]);
        assert!(graph.get("a.ts").unwrap().imports.is_empty());
    }

    #[test]
    fn rebuild_reflects_current_index_only() {
        let enumerator = StaticFileEnumerator::new()
            .add("a.ts", "import { v } from './b';")
            .add("b.ts", "export const v = 1;");
        let mut index = SemanticIndex::new().unwrap();
        index.build(&enumerator, &CancellationToken::new()).unwrap();
        let first = RelationshipGraph::build(&index);
        assert_eq!(first.len(), 2);

        let smaller = StaticFileEnumerator::new().add("a.ts", "export const a = 1;");
        index.build(&smaller, &CancellationToken::new()).unwrap();
        let second = RelationshipGraph::build(&index);
        assert_eq!(second.len(), 1);
        assert!(second.get("b.ts").is_none());
    }
}
