//! Local import-specifier resolution against the semantic index.

use crate::index::SemanticIndex;
use crate::language::RESOLVABLE_EXTENSIONS;

/// Resolve a local specifier from `importer` to an indexed path.
///
/// Candidates are tried in order: the resolved path with each recognized
/// extension appended, then an `index.<ext>` file inside the resolved
/// directory for each extension. The first candidate present in the index
/// wins; `None` means the dependency is dropped (never an error).
pub fn resolve_specifier(
    importer: &str,
    specifier: &str,
    index: &SemanticIndex,
) -> Option<String> {
    let joined = if let Some(rooted) = specifier.strip_prefix('/') {
        rooted.to_string()
    } else {
        match parent_dir(importer) {
            Some(dir) => format!("{dir}/{specifier}"),
            None => specifier.to_string(),
        }
    };
    let base = normalize_segments(&joined)?;

    for ext in RESOLVABLE_EXTENSIONS {
        let candidate = format!("{base}.{ext}");
        if index.contains(&candidate) {
            return Some(candidate);
        }
    }
    for ext in RESOLVABLE_EXTENSIONS {
        let candidate = if base.is_empty() {
            format!("index.{ext}")
        } else {
            format!("{base}/index.{ext}")
        };
        if index.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Directory part of a slash-separated path, `None` at the root.
fn parent_dir(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(dir, _)| dir)
}

/// Collapse `.` and `..` segments. `None` when `..` escapes the root.
fn normalize_segments(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::StaticFileEnumerator;
    use lodestone_core::traits::CancellationToken;

    fn index_of(files: &[(&str, &str)]) -> SemanticIndex {
        let mut enumerator = StaticFileEnumerator::new();
        for (path, content) in files {
            enumerator = enumerator.add(*path, *content);
        }
        let mut index = SemanticIndex::new().unwrap();
        index.build(&enumerator, &CancellationToken::new()).unwrap();
        index
    }

    #[test]
    fn resolves_sibling_with_extension_appended() {
        let index = index_of(&[("src/a.ts", ""), ("src/b.ts", "")]);
        assert_eq!(
            resolve_specifier("src/a.ts", "./b", &index),
            Some("src/b.ts".to_string())
        );
    }

    #[test]
    fn extension_order_prefers_typescript() {
        let index = index_of(&[("src/a.ts", ""), ("src/b.ts", ""), ("src/b.js", "")]);
        assert_eq!(
            resolve_specifier("src/a.ts", "./b", &index),
            Some("src/b.ts".to_string())
        );
    }

    #[test]
    fn falls_back_to_directory_index_file() {
        let index = index_of(&[("src/a.ts", ""), ("src/util/index.ts", "")]);
        assert_eq!(
            resolve_specifier("src/a.ts", "./util", &index),
            Some("src/util/index.ts".to_string())
        );
    }

    #[test]
    fn parent_traversal_resolves() {
        let index = index_of(&[("src/deep/a.ts", ""), ("src/b.ts", "")]);
        assert_eq!(
            resolve_specifier("src/deep/a.ts", "../b", &index),
            Some("src/b.ts".to_string())
        );
    }

    #[test]
    fn escaping_the_root_is_unresolvable() {
        let index = index_of(&[("a.ts", "")]);
        assert_eq!(resolve_specifier("a.ts", "../../b", &index), None);
    }

    #[test]
    fn unknown_target_is_unresolvable() {
        let index = index_of(&[("a.ts", "")]);
        assert_eq!(resolve_specifier("a.ts", "./missing", &index), None);
    }
}
