//! In-memory enumerator for tests and embedded callers.

use lodestone_core::errors::AnalysisError;
use lodestone_core::types::collections::{FxHashMap, FxHashSet};

use super::{FileEnumerator, FileRef};

/// Serves a fixed set of in-memory files.
///
/// Paths registered via `add_unreadable` are enumerated but fail on `read`,
/// which exercises the per-file degradation path without touching a
/// filesystem.
#[derive(Debug, Default)]
pub struct StaticFileEnumerator {
    files: Vec<FileRef>,
    contents: FxHashMap<String, String>,
    unreadable: FxHashSet<String>,
}

impl StaticFileEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a readable file under `relative_path`.
    pub fn add(mut self, relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        self.files
            .push(FileRef::new(relative_path.clone(), relative_path.clone()));
        self.contents.insert(relative_path, content.into());
        self
    }

    /// Register a file that will fail every `read` call.
    pub fn add_unreadable(mut self, relative_path: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        self.files
            .push(FileRef::new(relative_path.clone(), relative_path.clone()));
        self.unreadable.insert(relative_path);
        self
    }
}

impl FileEnumerator for StaticFileEnumerator {
    fn enumerate(&self) -> Result<Vec<FileRef>, AnalysisError> {
        Ok(self.files.clone())
    }

    fn read(&self, file: &FileRef) -> std::io::Result<String> {
        if self.unreadable.contains(&file.relative_path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("unreadable file: {}", file.relative_path),
            ));
        }
        self.contents
            .get(&file.relative_path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "unknown file"))
    }
}
