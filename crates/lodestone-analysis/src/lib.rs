//! # lodestone-analysis
//!
//! The indexing half of the lodestone engine: file enumeration, language
//! detection, the lexical analyzer, the semantic index, and the
//! relationship graph built over local import edges.

pub mod enumerate;
pub mod graph;
pub mod index;
pub mod language;
pub mod lexical;

pub use enumerate::{FileEnumerator, FileRef, FsFileEnumerator, StaticFileEnumerator};
pub use graph::{CodeRelationship, RelationshipGraph};
pub use index::{IndexStats, SemanticIndex};
pub use language::SourceLanguage;
pub use lexical::{LexicalAnalyzer, SemanticAnalysis};
