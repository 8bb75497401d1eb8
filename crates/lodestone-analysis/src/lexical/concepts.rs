//! Concept extraction from trigger vocabularies.
//!
//! A single aho-corasick automaton scans the file once for every trigger
//! word of every concept; a concept is emitted as soon as one trigger is
//! present, with confidence proportional to the fraction of its vocabulary
//! observed.

use aho_corasick::AhoCorasick;
use lodestone_core::errors::AnalysisError;
use smallvec::SmallVec;

use super::types::{Concept, ConceptKind};

struct ConceptSpec {
    name: &'static str,
    kind: ConceptKind,
    base_confidence: f64,
    triggers: &'static [&'static str],
}

const CONCEPT_TABLE: &[ConceptSpec] = &[
    ConceptSpec {
        name: "authentication",
        kind: ConceptKind::Domain,
        base_confidence: 0.9,
        triggers: &["auth", "login", "password", "token", "session"],
    },
    ConceptSpec {
        name: "authorization",
        kind: ConceptKind::Domain,
        base_confidence: 0.85,
        triggers: &["role", "permission", "grant", "policy"],
    },
    ConceptSpec {
        name: "web-api",
        kind: ConceptKind::Domain,
        base_confidence: 0.85,
        triggers: &["http", "request", "response", "endpoint", "route"],
    },
    ConceptSpec {
        name: "data-persistence",
        kind: ConceptKind::Infrastructure,
        base_confidence: 0.85,
        triggers: &["database", "query", "transaction", "migration", "repository"],
    },
    ConceptSpec {
        name: "caching",
        kind: ConceptKind::Infrastructure,
        base_confidence: 0.8,
        triggers: &["cache", "ttl", "expire", "evict"],
    },
    ConceptSpec {
        name: "messaging",
        kind: ConceptKind::Infrastructure,
        base_confidence: 0.8,
        triggers: &["queue", "publish", "subscribe", "broker"],
    },
    ConceptSpec {
        name: "logging",
        kind: ConceptKind::Infrastructure,
        base_confidence: 0.75,
        triggers: &["logger", "log.", "console.", "tracing"],
    },
    ConceptSpec {
        name: "validation",
        kind: ConceptKind::Pattern,
        base_confidence: 0.8,
        triggers: &["validate", "sanitize", "constraint", "schema"],
    },
    ConceptSpec {
        name: "error-handling",
        kind: ConceptKind::Pattern,
        base_confidence: 0.75,
        triggers: &["error", "exception", "catch", "retry"],
    },
    ConceptSpec {
        name: "testing",
        kind: ConceptKind::Pattern,
        base_confidence: 0.8,
        triggers: &["test", "assert", "expect", "mock"],
    },
    ConceptSpec {
        name: "payments",
        kind: ConceptKind::Business,
        base_confidence: 0.9,
        triggers: &["payment", "invoice", "billing", "checkout"],
    },
    ConceptSpec {
        name: "orders",
        kind: ConceptKind::Business,
        base_confidence: 0.85,
        triggers: &["order", "cart", "shipment", "inventory"],
    },
];

/// One automaton over every trigger word in the concept table.
pub struct ConceptScanner {
    automaton: AhoCorasick,
    /// Pattern index -> (concept index, trigger index within the concept).
    owners: Vec<(usize, usize)>,
}

impl ConceptScanner {
    pub fn new() -> Result<Self, AnalysisError> {
        let mut patterns = Vec::new();
        let mut owners = Vec::new();
        for (concept_idx, spec) in CONCEPT_TABLE.iter().enumerate() {
            for (trigger_idx, trigger) in spec.triggers.iter().enumerate() {
                patterns.push(*trigger);
                owners.push((concept_idx, trigger_idx));
            }
        }
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| AnalysisError::Pattern(e.to_string()))?;
        Ok(Self { automaton, owners })
    }

    /// Scan `content` once, emitting each concept whose vocabulary appears.
    pub fn scan(&self, content: &str) -> Vec<Concept> {
        let mut matched: Vec<SmallVec<[usize; 8]>> =
            (0..CONCEPT_TABLE.len()).map(|_| SmallVec::new()).collect();

        for hit in self.automaton.find_overlapping_iter(content) {
            let (concept_idx, trigger_idx) = self.owners[hit.pattern().as_usize()];
            if !matched[concept_idx].contains(&trigger_idx) {
                matched[concept_idx].push(trigger_idx);
            }
        }

        CONCEPT_TABLE
            .iter()
            .zip(matched.iter())
            .filter(|(_, hits)| !hits.is_empty())
            .map(|(spec, hits)| Concept {
                kind: spec.kind,
                name: spec.name.to_string(),
                confidence: spec.base_confidence * hits.len() as f64
                    / spec.triggers.len() as f64,
            })
            .collect()
    }
}
