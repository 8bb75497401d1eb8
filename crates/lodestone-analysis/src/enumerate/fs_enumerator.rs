//! Filesystem enumerator backed by the `ignore` walker.

use std::path::PathBuf;

use lodestone_core::errors::AnalysisError;

use super::{normalize_slashes, FileEnumerator, FileRef};

/// Walks a project root, honoring `.gitignore` and skipping hidden entries.
///
/// Files larger than `max_file_size` are skipped at enumeration time so the
/// analyzer never reads them.
pub struct FsFileEnumerator {
    root: PathBuf,
    max_file_size: u64,
}

impl FsFileEnumerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size: 1_048_576,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

impl FileEnumerator for FsFileEnumerator {
    fn enumerate(&self) -> Result<Vec<FileRef>, AnalysisError> {
        let mut files = Vec::new();

        for entry in ignore::WalkBuilder::new(&self.root).build() {
            let entry = entry.map_err(|e| AnalysisError::Enumeration(e.to_string()))?;
            let is_file = entry
                .file_type()
                .map(|ft| ft.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size {
                    tracing::debug!(
                        path = %entry.path().display(),
                        size = metadata.len(),
                        "skipping oversized file"
                    );
                    continue;
                }
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            files.push(FileRef::new(
                entry.path().display().to_string(),
                normalize_slashes(&relative.display().to_string()),
            ));
        }

        Ok(files)
    }

    fn read(&self, file: &FileRef) -> std::io::Result<String> {
        std::fs::read_to_string(&file.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_and_reads_files() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.ts"), "export function f() {}").unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/b.ts"), "const x = 1;").unwrap();

        let enumerator = FsFileEnumerator::new(dir.path());
        let mut files = enumerator.enumerate().unwrap();
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, "a.ts");
        assert_eq!(files[1].relative_path, "src/b.ts");

        let content = enumerator.read(&files[0]).unwrap();
        assert!(content.contains("function f"));
    }

    #[test]
    fn oversized_files_are_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("big.ts"), "x".repeat(64)).unwrap();
        std::fs::write(dir.path().join("small.ts"), "y").unwrap();

        let enumerator = FsFileEnumerator::new(dir.path()).with_max_file_size(16);
        let files = enumerator.enumerate().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "small.ts");
    }
}
