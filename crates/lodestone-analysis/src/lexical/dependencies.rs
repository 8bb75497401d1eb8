//! Dependency and export extraction.

use lodestone_core::errors::AnalysisError;
use lodestone_core::types::collections::FxHashSet;
use regex::Regex;

use super::types::{Dependency, DependencyKind, Export, ExportKind};

/// Platform-provided modules; never candidates for graph edges.
const BUILTIN_MODULES: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "crypto",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "process",
    "querystring",
    "stream",
    "url",
    "util",
    "zlib",
];

/// Compiled scanners over import-like and export-like statements.
pub struct DependencyScanner {
    from_re: Regex,
    bare_import_re: Regex,
    require_re: Regex,
    export_class_re: Regex,
    export_function_re: Regex,
    export_interface_re: Regex,
    export_variable_re: Regex,
    export_named_re: Regex,
    export_default_re: Regex,
}

impl DependencyScanner {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            from_re: compile(r#"(?m)\bfrom\s*['"]([^'"]+)['"]"#)?,
            bare_import_re: compile(r#"(?m)^[ \t]*import\s*\(?\s*['"]([^'"]+)['"]"#)?,
            require_re: compile(r#"\brequire\s*\(\s*['"]([^'"]+)['"]\s*\)"#)?,
            export_class_re: compile(
                r"(?m)^[ \t]*export\s+(?:abstract\s+)?class\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            export_function_re: compile(
                r"(?m)^[ \t]*export\s+(?:async\s+)?function\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            export_interface_re: compile(
                r"(?m)^[ \t]*export\s+interface\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            export_variable_re: compile(
                r"(?m)^[ \t]*export\s+(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            export_named_re: compile(r"(?m)^[ \t]*export\s*\{([^}]*)\}")?,
            export_default_re: compile(r"(?m)^[ \t]*export\s+default\b")?,
        })
    }

    /// Scan for import/require specifiers, deduplicated in document order.
    pub fn scan_dependencies(&self, content: &str) -> Vec<Dependency> {
        let mut hits: Vec<(usize, &str)> = Vec::new();
        for re in [&self.from_re, &self.bare_import_re, &self.require_re] {
            for captures in re.captures_iter(content) {
                if let Some(m) = captures.get(1) {
                    hits.push((m.start(), m.as_str()));
                }
            }
        }
        hits.sort_by_key(|(offset, _)| *offset);

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        hits.into_iter()
            .filter(|(_, spec)| seen.insert(spec))
            .map(|(_, spec)| Dependency {
                specifier: spec.to_string(),
                kind: classify_specifier(spec),
            })
            .collect()
    }

    /// Scan for exported names, deduplicated by name in document order.
    pub fn scan_exports(&self, content: &str) -> Vec<Export> {
        let mut hits: Vec<(usize, Export)> = Vec::new();

        let declaration_passes: [(&Regex, ExportKind); 4] = [
            (&self.export_class_re, ExportKind::Class),
            (&self.export_function_re, ExportKind::Function),
            (&self.export_interface_re, ExportKind::Interface),
            (&self.export_variable_re, ExportKind::Variable),
        ];
        for (re, kind) in declaration_passes {
            for captures in re.captures_iter(content) {
                if let Some(m) = captures.get(1) {
                    hits.push((
                        m.start(),
                        Export {
                            name: m.as_str().to_string(),
                            kind,
                        },
                    ));
                }
            }
        }

        // Named export lists: `export { a, b as c }`.
        for captures in self.export_named_re.captures_iter(content) {
            if let Some(list) = captures.get(1) {
                for raw in list.as_str().split(',') {
                    let name = match raw.split_once(" as ") {
                        Some((_, alias)) => alias.trim(),
                        None => raw.trim(),
                    };
                    if name.is_empty() || name == "default" {
                        continue;
                    }
                    hits.push((
                        list.start(),
                        Export {
                            name: name.to_string(),
                            kind: ExportKind::Variable,
                        },
                    ));
                }
            }
        }

        for m in self.export_default_re.find_iter(content) {
            hits.push((
                m.start(),
                Export {
                    name: "default".to_string(),
                    kind: ExportKind::Default,
                },
            ));
        }

        hits.sort_by_key(|(offset, _)| *offset);
        let mut seen: FxHashSet<String> = FxHashSet::default();
        hits.into_iter()
            .filter(|(_, export)| seen.insert(export.name.clone()))
            .map(|(_, export)| export)
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex, AnalysisError> {
    Regex::new(pattern).map_err(|e| AnalysisError::Pattern(e.to_string()))
}

/// Local starts with `.` or `/`; builtin is in the platform list
/// (with any `node:` prefix stripped); everything else is external.
fn classify_specifier(specifier: &str) -> DependencyKind {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return DependencyKind::Local;
    }
    let base = specifier.strip_prefix("node:").unwrap_or(specifier);
    let base = base.split('/').next().unwrap_or(base);
    if BUILTIN_MODULES.contains(&base) {
        DependencyKind::Builtin
    } else {
        DependencyKind::External
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> DependencyScanner {
        DependencyScanner::new().unwrap()
    }

    #[test]
    fn classifies_local_builtin_external() {
        let content = r#"
import { helper } from './util/helper';
import fs from 'fs';
import express from 'express';
const legacy = require('../legacy');
"#;
        let deps = scanner().scan_dependencies(content);
        let kinds: Vec<(&str, DependencyKind)> = deps
            .iter()
            .map(|d| (d.specifier.as_str(), d.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("./util/helper", DependencyKind::Local),
                ("fs", DependencyKind::Builtin),
                ("express", DependencyKind::External),
                ("../legacy", DependencyKind::Local),
            ]
        );
    }

    #[test]
    fn node_prefixed_builtins_recognized() {
        let deps = scanner().scan_dependencies("import { join } from 'node:path';");
        assert_eq!(deps[0].kind, DependencyKind::Builtin);
    }

    #[test]
    fn duplicate_specifiers_collapse() {
        let content = "import a from './a';\nimport { b } from './a';\n";
        let deps = scanner().scan_dependencies(content);
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn extracts_export_declarations() {
        let content = r#"
export class OrderService {}
export function validateOrder(order) {}
export interface Order {}
export const TAX_RATE = 0.2;
export default OrderService;
"#;
        let exports = scanner().scan_exports(content);
        let pairs: Vec<(&str, ExportKind)> = exports
            .iter()
            .map(|e| (e.name.as_str(), e.kind))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("OrderService", ExportKind::Class),
                ("validateOrder", ExportKind::Function),
                ("Order", ExportKind::Interface),
                ("TAX_RATE", ExportKind::Variable),
                ("default", ExportKind::Default),
            ]
        );
    }

    #[test]
    fn named_export_lists_use_aliases() {
        let exports = scanner().scan_exports("export { a, b as c } from './other';\n");
        let names: Vec<&str> = exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn reexport_is_also_a_dependency() {
        let deps = scanner().scan_dependencies("export { a } from './other';\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].specifier, "./other");
        assert_eq!(deps[0].kind, DependencyKind::Local);
    }
}
