//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// Source languages the lexical analyzer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    TypeScript,
    JavaScript,
    Python,
    Rust,
    Go,
    Java,
}

/// Extension probe order for import-specifier resolution.
///
/// Order matters: the graph builder appends these to a local specifier one
/// by one and stops at the first indexed hit, so TypeScript shadows
/// JavaScript for a shared basename.
pub const RESOLVABLE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "rs", "go", "java",
];

impl SourceLanguage {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<SourceLanguage> {
        match ext? {
            "ts" | "tsx" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "py" | "pyi" => Some(SourceLanguage::Python),
            "rs" => Some(SourceLanguage::Rust),
            "go" => Some(SourceLanguage::Go),
            "java" => Some(SourceLanguage::Java),
            _ => None,
        }
    }

    /// Detect language from a path's extension.
    pub fn from_path(path: &str) -> Option<SourceLanguage> {
        Self::from_extension(extension_of(path))
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::JavaScript => "JavaScript",
            SourceLanguage::Python => "Python",
            SourceLanguage::Rust => "Rust",
            SourceLanguage::Go => "Go",
            SourceLanguage::Java => "Java",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of a slash-separated path, without the dot.
pub fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        // Dotfiles like `.gitignore` have no extension.
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_typescript_variants() {
        for ext in ["ts", "tsx", "mts", "cts"] {
            assert_eq!(
                SourceLanguage::from_extension(Some(ext)),
                Some(SourceLanguage::TypeScript)
            );
        }
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(SourceLanguage::from_extension(Some("md")), None);
        assert_eq!(SourceLanguage::from_extension(None), None);
    }

    #[test]
    fn extension_of_handles_dotfiles_and_dirs() {
        assert_eq!(extension_of("src/a.ts"), Some("ts"));
        assert_eq!(extension_of("src/.gitignore"), None);
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("a.test.js"), Some("js"));
    }
}
