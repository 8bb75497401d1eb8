//! Pattern detection: independent boolean token checks, fixed confidences.

use super::types::{DetectedPattern, PatternKind};

/// Detects coding patterns from token co-occurrence.
///
/// Every check is independent and yields a fixed confidence; there is no
/// scoring interplay between checks. Checks run on a lowercased copy so
/// casing never matters.
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, content: &str) -> Vec<DetectedPattern> {
        let text = content.to_lowercase();
        let mut patterns = Vec::new();

        let mut push = |kind: PatternKind, name: &str, confidence: f64| {
            patterns.push(DetectedPattern {
                kind,
                name: name.to_string(),
                confidence,
            });
        };

        if text.contains("extends ") && text.contains("super") {
            push(PatternKind::Oop, "inheritance", 0.9);
        }
        if text.contains("class ") && (text.contains("private ") || text.contains("protected ")) {
            push(PatternKind::Oop, "encapsulation", 0.7);
        }
        if text.contains("async ") && text.contains("await ") {
            push(PatternKind::Async, "async-await", 0.9);
        }
        if text.contains(".then(") {
            push(PatternKind::Async, "promise-chaining", 0.7);
        }
        if text.contains(".map(") && (text.contains(".filter(") || text.contains(".reduce(")) {
            push(PatternKind::Functional, "higher-order-functions", 0.8);
        }
        if text.contains("readonly ") || text.contains("object.freeze(") {
            push(PatternKind::Functional, "immutability", 0.6);
        }
        if text.contains("import ") && text.contains("export ") {
            push(PatternKind::Module, "es-modules", 0.85);
        }
        if text.contains("require(") && text.contains("module.exports") {
            push(PatternKind::Module, "commonjs", 0.75);
        }
        if text.contains("getinstance") {
            push(PatternKind::Architectural, "singleton", 0.75);
        }
        if (text.contains("subscribe") && text.contains("emit")) || text.contains("addeventlistener")
        {
            push(PatternKind::Architectural, "observer", 0.7);
        }
        if text.contains("@injectable") || text.contains("@inject(") {
            push(PatternKind::Architectural, "dependency-injection", 0.7);
        }

        patterns
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
