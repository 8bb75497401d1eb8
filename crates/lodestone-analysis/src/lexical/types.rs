//! Data model produced by the lexical analyzer.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Kind of a named code construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Function,
    Interface,
    Method,
    Variable,
}

/// Scope a symbol was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolScope {
    Global,
    Class,
}

/// A named code construct located at a file/line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    pub scope: SymbolScope,
    pub file_path: String,
    pub line_number: u32,
}

/// Kind of a concept inferred from vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptKind {
    Domain,
    Pattern,
    Infrastructure,
    Business,
}

/// A coarse domain/pattern label inferred from vocabulary present in a file.
/// Confidence is proportional to the fraction of the concept's trigger
/// vocabulary observed in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub kind: ConceptKind,
    pub name: String,
    pub confidence: f64,
}

/// Family of a detected coding pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Oop,
    Functional,
    Async,
    Module,
    Architectural,
}

/// A coding pattern detected by an independent boolean token check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    pub name: String,
    pub confidence: f64,
}

/// Lexical complexity metrics for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Non-empty line count.
    pub lines: usize,
    /// Control-flow and logical-operator token count.
    pub conditions: usize,
    /// Function-introducer token count.
    pub functions: usize,
    /// conditions + functions + 1.
    pub cyclomatic_complexity: usize,
    /// max(0, 171 - 5.2*ln(lines) - 0.23*cyclomatic_complexity).
    pub maintainability_index: f64,
}

impl Default for ComplexityMetrics {
    fn default() -> Self {
        Self {
            lines: 0,
            conditions: 0,
            functions: 0,
            cyclomatic_complexity: 1,
            maintainability_index: 171.0,
        }
    }
}

/// Classification of an import specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Starts with `.` or `/`; candidate for a graph edge.
    Local,
    /// Everything that is neither local nor a platform builtin.
    External,
    /// Platform-provided module; terminal, never a graph edge.
    Builtin,
}

/// One import/require statement's referenced path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub specifier: String,
    pub kind: DependencyKind,
}

/// Kind of an exported name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportKind {
    Class,
    Function,
    Interface,
    Variable,
    Default,
}

/// One exported name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
}

/// The full lexical analysis of one file.
///
/// One instance per indexed file; replaced wholesale on refresh, never
/// partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    pub file_path: String,
    pub symbols: Vec<Symbol>,
    pub concepts: Vec<Concept>,
    pub patterns: Vec<DetectedPattern>,
    pub complexity: ComplexityMetrics,
    pub dependencies: Vec<Dependency>,
    pub exports: Vec<Export>,
    /// xxh3 hash of the analyzed content; lets refresh skip unchanged files.
    pub content_hash: u64,
    pub last_analyzed: SystemTime,
}

impl SemanticAnalysis {
    /// The degraded analysis recorded for a file that could not be read:
    /// zero symbols, zero concepts, cyclomatic complexity 1.
    pub fn empty(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            symbols: Vec::new(),
            concepts: Vec::new(),
            patterns: Vec::new(),
            complexity: ComplexityMetrics::default(),
            dependencies: Vec::new(),
            exports: Vec::new(),
            content_hash: 0,
            last_analyzed: SystemTime::now(),
        }
    }

    /// Local dependencies only; these are the graph-edge candidates.
    pub fn local_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Local)
    }
}
