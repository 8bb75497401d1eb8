//! Lexical analyzer: best-effort extraction of symbols, concepts, patterns,
//! complexity, dependencies, and exports from one file's text.
//!
//! No AST, no type information; independent compiled passes only. The goal
//! is to bias retrieval, not to be a compiler front end.

pub mod complexity;
pub mod concepts;
pub mod dependencies;
pub mod patterns;
pub mod symbols;
pub mod types;

pub use types::{
    ComplexityMetrics, Concept, ConceptKind, Dependency, DependencyKind, DetectedPattern, Export,
    ExportKind, PatternKind, SemanticAnalysis, Symbol, SymbolKind, SymbolScope,
};

use std::time::SystemTime;

use lodestone_core::errors::AnalysisError;

use crate::index::hasher::hash_content;
use complexity::ComplexityMeasurer;
use concepts::ConceptScanner;
use dependencies::DependencyScanner;
use patterns::PatternDetector;
use symbols::SymbolExtractor;

/// All compiled passes, built once and reused for every file.
pub struct LexicalAnalyzer {
    symbols: SymbolExtractor,
    concepts: ConceptScanner,
    patterns: PatternDetector,
    complexity: ComplexityMeasurer,
    dependencies: DependencyScanner,
}

impl LexicalAnalyzer {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            symbols: SymbolExtractor::new()?,
            concepts: ConceptScanner::new()?,
            patterns: PatternDetector::new(),
            complexity: ComplexityMeasurer::new()?,
            dependencies: DependencyScanner::new()?,
        })
    }

    /// Analyze one file's text. Infallible: the passes cannot error on any
    /// input, and unreadable files never reach this point (the index
    /// records [`SemanticAnalysis::empty`] for those instead).
    pub fn analyze(&self, file_path: &str, content: &str) -> SemanticAnalysis {
        SemanticAnalysis {
            file_path: file_path.to_string(),
            symbols: self.symbols.extract(file_path, content),
            concepts: self.concepts.scan(content),
            patterns: self.patterns.detect(content),
            complexity: self.complexity.measure(content),
            dependencies: self.dependencies.scan_dependencies(content),
            exports: self.dependencies.scan_exports(content),
            content_hash: hash_content(content.as_bytes()),
            last_analyzed: SystemTime::now(),
        }
    }
}
