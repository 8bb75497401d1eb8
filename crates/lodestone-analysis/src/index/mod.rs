//! The semantic index: file path -> lexical analysis.
//!
//! `build` replaces the whole index; `refresh` re-analyzes only the given
//! paths. Per-file analysis fans out on the rayon pool and failures are
//! isolated per file: an unreadable file degrades to an empty analysis and
//! the batch continues.

pub mod eligibility;
pub mod hasher;

use std::collections::BTreeMap;
use std::time::Instant;

use lodestone_core::errors::AnalysisError;
use lodestone_core::traits::{Cancellable, CancellationToken};
use lodestone_core::types::collections::FxHashMap;
use rayon::prelude::*;

use crate::enumerate::{FileEnumerator, FileRef};
use crate::lexical::{LexicalAnalyzer, SemanticAnalysis};
use hasher::hash_content;

/// Counters for one build/refresh run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Files the enumerator offered.
    pub files_seen: usize,
    /// Files analyzed (including degraded empty analyses).
    pub files_indexed: usize,
    /// Files whose content could not be read.
    pub files_failed: usize,
    /// Files skipped: ineligible, unknown to the enumerator, or unchanged.
    pub files_skipped: usize,
    pub duration_ms: u64,
}

enum FileOutcome {
    Analyzed {
        path: String,
        analysis: SemanticAnalysis,
        failed: bool,
    },
    Unchanged,
}

/// Mapping from relative file path to its lexical analysis.
///
/// Entries live in a `BTreeMap` so iteration order is path order,
/// deterministic across runs; ranking relies on this for tie-breaking.
pub struct SemanticIndex {
    entries: BTreeMap<String, SemanticAnalysis>,
    analyzer: LexicalAnalyzer,
}

impl SemanticIndex {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            entries: BTreeMap::new(),
            analyzer: LexicalAnalyzer::new()?,
        })
    }

    /// Replace the entire index from the enumerator's current file set.
    pub fn build(
        &mut self,
        enumerator: &dyn FileEnumerator,
        token: &CancellationToken,
    ) -> Result<IndexStats, AnalysisError> {
        let start = Instant::now();
        let files = enumerator.enumerate()?;
        let files_seen = files.len();

        let mut eligible: Vec<FileRef> = files
            .into_iter()
            .filter(|f| eligibility::is_eligible(&f.relative_path))
            .collect();
        eligible.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        let files_skipped = files_seen - eligible.len();

        let analyzer = &self.analyzer;
        let outcomes: Vec<Option<FileOutcome>> = eligible
            .par_iter()
            .map(|file| {
                if token.is_cancelled() {
                    return None;
                }
                Some(analyze_one(analyzer, enumerator, file))
            })
            .collect();

        if token.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let mut entries = BTreeMap::new();
        let mut stats = IndexStats {
            files_seen,
            files_skipped,
            ..Default::default()
        };
        for outcome in outcomes.into_iter().flatten() {
            if let FileOutcome::Analyzed {
                path,
                analysis,
                failed,
            } = outcome
            {
                stats.files_indexed += 1;
                if failed {
                    stats.files_failed += 1;
                }
                entries.insert(path, analysis);
            }
        }
        self.entries = entries;

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files_seen = stats.files_seen,
            files_indexed = stats.files_indexed,
            files_failed = stats.files_failed,
            files_skipped = stats.files_skipped,
            duration_ms = stats.duration_ms,
            "semantic index built"
        );
        Ok(stats)
    }

    /// Re-analyze only `paths`, leaving other entries untouched.
    ///
    /// Files whose stored content hash is unchanged keep their existing
    /// entry: identical content produces an identical analysis, so
    /// re-running the passes would only move the timestamp.
    pub fn refresh(
        &mut self,
        paths: &[String],
        enumerator: &dyn FileEnumerator,
        token: &CancellationToken,
    ) -> Result<IndexStats, AnalysisError> {
        let start = Instant::now();
        let files = enumerator.enumerate()?;
        let by_path: FxHashMap<&str, &FileRef> = files
            .iter()
            .map(|f| (f.relative_path.as_str(), f))
            .collect();

        let mut targets: Vec<&FileRef> = Vec::new();
        let mut files_skipped = 0usize;
        for path in paths {
            match by_path.get(path.as_str()) {
                Some(file) if eligibility::is_eligible(path) => targets.push(file),
                _ => {
                    tracing::debug!(path = %path, "refresh target not eligible or not enumerated");
                    files_skipped += 1;
                }
            }
        }
        targets.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        let analyzer = &self.analyzer;
        let entries = &self.entries;
        let outcomes: Vec<Option<FileOutcome>> = targets
            .par_iter()
            .map(|file| {
                if token.is_cancelled() {
                    return None;
                }
                let previous_hash = entries.get(&file.relative_path).map(|a| a.content_hash);
                if let (Some(previous), Ok(content)) = (previous_hash, enumerator.read(file)) {
                    if hash_content(content.as_bytes()) == previous {
                        return Some(FileOutcome::Unchanged);
                    }
                    return Some(FileOutcome::Analyzed {
                        path: file.relative_path.clone(),
                        analysis: analyzer.analyze(&file.relative_path, &content),
                        failed: false,
                    });
                }
                Some(analyze_one(analyzer, enumerator, file))
            })
            .collect();

        if token.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let mut stats = IndexStats {
            files_seen: paths.len(),
            files_skipped,
            ..Default::default()
        };
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                FileOutcome::Analyzed {
                    path,
                    analysis,
                    failed,
                } => {
                    stats.files_indexed += 1;
                    if failed {
                        stats.files_failed += 1;
                    }
                    self.entries.insert(path, analysis);
                }
                FileOutcome::Unchanged => stats.files_skipped += 1,
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files_seen = stats.files_seen,
            files_indexed = stats.files_indexed,
            files_failed = stats.files_failed,
            files_skipped = stats.files_skipped,
            duration_ms = stats.duration_ms,
            "semantic index refreshed"
        );
        Ok(stats)
    }

    pub fn get(&self, path: &str) -> Option<&SemanticAnalysis> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SemanticAnalysis)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Analyze one file; a read failure degrades to an empty analysis.
fn analyze_one(
    analyzer: &LexicalAnalyzer,
    enumerator: &dyn FileEnumerator,
    file: &FileRef,
) -> FileOutcome {
    match enumerator.read(file) {
        Ok(content) => FileOutcome::Analyzed {
            path: file.relative_path.clone(),
            analysis: analyzer.analyze(&file.relative_path, &content),
            failed: false,
        },
        Err(error) => {
            tracing::debug!(path = %file.relative_path, %error, "file unreadable, recording empty analysis");
            FileOutcome::Analyzed {
                path: file.relative_path.clone(),
                analysis: SemanticAnalysis::empty(&file.relative_path),
                failed: true,
            }
        }
    }
}
