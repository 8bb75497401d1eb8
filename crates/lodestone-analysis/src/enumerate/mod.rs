//! File enumeration: the boundary through which source files enter the engine.
//!
//! The enumerator only lists and reads files; eligibility rules (extension,
//! excluded directories) are applied by the index on top of whatever the
//! enumerator supplies.

mod fs_enumerator;
mod static_enumerator;

pub use fs_enumerator::FsFileEnumerator;
pub use static_enumerator::StaticFileEnumerator;

use lodestone_core::errors::AnalysisError;

/// A file the enumerator offers for analysis.
///
/// `relative_path` is the index key: always forward-slash separated,
/// relative to the enumerated root. `path` is whatever the enumerator
/// needs to read the file back (absolute for the filesystem enumerator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub path: String,
    pub relative_path: String,
}

impl FileRef {
    pub fn new(path: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
        }
    }
}

/// Supplies the set of source files with paths and content.
///
/// `read` failures are per-file: the index degrades the file to an empty
/// analysis and moves on. Only `enumerate` failures abort a build.
pub trait FileEnumerator: Send + Sync {
    /// List candidate files. Ordering does not matter; the index sorts.
    fn enumerate(&self) -> Result<Vec<FileRef>, AnalysisError>;

    /// Read one file's content.
    fn read(&self, file: &FileRef) -> std::io::Result<String>;
}

/// Normalize a path string to forward slashes.
pub(crate) fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
