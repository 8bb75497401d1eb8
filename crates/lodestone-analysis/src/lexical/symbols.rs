//! Symbol extraction: independent compiled passes, one per symbol kind.

use lodestone_core::errors::AnalysisError;
use lodestone_core::types::collections::FxHashSet;
use regex::Regex;

use super::types::{Symbol, SymbolKind, SymbolScope};

/// Keywords the method pass must ignore: control-flow syntax that looks
/// like a call followed by a block.
const METHOD_KEYWORD_DENYLIST: &[&str] = &["constructor", "if", "for", "while", "switch", "catch"];

/// Compiled per-kind extraction passes.
///
/// Each pass runs independently over the raw text; there is no shared
/// parse state. This is a best-effort lexical scan, not a parser.
pub struct SymbolExtractor {
    class_re: Regex,
    function_re: Regex,
    arrow_re: Regex,
    interface_re: Regex,
    method_re: Regex,
    variable_re: Regex,
}

impl SymbolExtractor {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            class_re: compile(
                r"(?m)^[ \t]*(?:export\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            function_re: compile(
                r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            arrow_re: compile(
                r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s+)?(?:\([^)\n]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>",
            )?,
            interface_re: compile(
                r"(?m)^[ \t]*(?:export\s+)?interface\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )?,
            method_re: compile(
                r"(?m)^[ \t]+(?:(?:public|private|protected|static|async|override)\s+)*([A-Za-z_$][A-Za-z0-9_$]*)\s*\([^)\n]*\)\s*[:{]",
            )?,
            variable_re: compile(
                r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*[=:]",
            )?,
        })
    }

    /// Run every pass over `content` and collect symbols in pass order.
    pub fn extract(&self, file_path: &str, content: &str) -> Vec<Symbol> {
        let line_starts = line_starts(content);
        let mut symbols = Vec::new();

        self.run_pass(
            &self.class_re,
            content,
            file_path,
            &line_starts,
            SymbolKind::Class,
            SymbolScope::Global,
            &mut symbols,
        );
        self.run_pass(
            &self.function_re,
            content,
            file_path,
            &line_starts,
            SymbolKind::Function,
            SymbolScope::Global,
            &mut symbols,
        );
        self.run_pass(
            &self.arrow_re,
            content,
            file_path,
            &line_starts,
            SymbolKind::Function,
            SymbolScope::Global,
            &mut symbols,
        );
        self.run_pass(
            &self.interface_re,
            content,
            file_path,
            &line_starts,
            SymbolKind::Interface,
            SymbolScope::Global,
            &mut symbols,
        );

        // Method pass: indented name(...) { ... } signatures, with the
        // control-flow denylist applied to the captured name.
        for captures in self.method_re.captures_iter(content) {
            let name_match = match captures.get(1) {
                Some(m) => m,
                None => continue,
            };
            let name = name_match.as_str();
            if METHOD_KEYWORD_DENYLIST.contains(&name) {
                continue;
            }
            symbols.push(Symbol {
                kind: SymbolKind::Method,
                name: name.to_string(),
                scope: SymbolScope::Class,
                file_path: file_path.to_string(),
                line_number: line_of(&line_starts, name_match.start()),
            });
        }

        // Variable pass runs last and skips names the arrow pass already
        // claimed as functions.
        let function_names: FxHashSet<String> = symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Function)
            .map(|s| s.name.clone())
            .collect();
        for captures in self.variable_re.captures_iter(content) {
            let name_match = match captures.get(1) {
                Some(m) => m,
                None => continue,
            };
            let name = name_match.as_str();
            if function_names.contains(name) {
                continue;
            }
            symbols.push(Symbol {
                kind: SymbolKind::Variable,
                name: name.to_string(),
                scope: SymbolScope::Global,
                file_path: file_path.to_string(),
                line_number: line_of(&line_starts, name_match.start()),
            });
        }

        symbols
    }

    #[allow(clippy::too_many_arguments)]
    fn run_pass(
        &self,
        pass: &Regex,
        content: &str,
        file_path: &str,
        line_starts: &[usize],
        kind: SymbolKind,
        scope: SymbolScope,
        out: &mut Vec<Symbol>,
    ) {
        for captures in pass.captures_iter(content) {
            if let Some(name_match) = captures.get(1) {
                out.push(Symbol {
                    kind,
                    name: name_match.as_str().to_string(),
                    scope,
                    file_path: file_path.to_string(),
                    line_number: line_of(line_starts, name_match.start()),
                });
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, AnalysisError> {
    Regex::new(pattern).map_err(|e| AnalysisError::Pattern(e.to_string()))
}

/// Byte offsets of every line start, for offset-to-line translation.
fn line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (offset, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset + 1);
        }
    }
    starts
}

/// 1-based line number of a byte offset.
fn line_of(line_starts: &[usize], offset: usize) -> u32 {
    line_starts.partition_point(|&start| start <= offset) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SymbolExtractor {
        SymbolExtractor::new().unwrap()
    }

    fn names_of(symbols: &[Symbol], kind: SymbolKind) -> Vec<&str> {
        symbols
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.name.as_str())
            .collect()
    }

    #[test]
    fn extracts_classes_functions_interfaces() {
        let content = r#"
export class OrderService {
}

export interface Order {
}

export async function processOrder(order: Order) {
}

const toCents = (amount: number) => Math.round(amount * 100);
"#;
        let symbols = extractor().extract("orders.ts", content);
        assert_eq!(names_of(&symbols, SymbolKind::Class), vec!["OrderService"]);
        assert_eq!(names_of(&symbols, SymbolKind::Interface), vec!["Order"]);
        assert_eq!(
            names_of(&symbols, SymbolKind::Function),
            vec!["processOrder", "toCents"]
        );
    }

    #[test]
    fn method_pass_skips_control_flow_keywords() {
        let content = r#"
class Cart {
  addItem(item) {
    if (item.valid) {
      this.items.push(item);
    }
    for (const hook of this.hooks) {
      hook(item);
    }
  }

  constructor() {
  }
}
"#;
        let symbols = extractor().extract("cart.js", content);
        let methods = names_of(&symbols, SymbolKind::Method);
        assert!(methods.contains(&"addItem"));
        assert!(!methods.contains(&"if"));
        assert!(!methods.contains(&"for"));
        assert!(!methods.contains(&"constructor"));
    }

    #[test]
    fn line_numbers_are_one_based() {
        let content = "class A {}\nclass B {}\n";
        let symbols = extractor().extract("x.ts", content);
        assert_eq!(symbols[0].line_number, 1);
        assert_eq!(symbols[1].line_number, 2);
    }

    #[test]
    fn arrow_function_not_double_counted_as_variable() {
        let content = "const handler = (req) => {};\nconst limit = 10;\n";
        let symbols = extractor().extract("x.ts", content);
        assert_eq!(names_of(&symbols, SymbolKind::Function), vec!["handler"]);
        assert_eq!(names_of(&symbols, SymbolKind::Variable), vec!["limit"]);
    }

    #[test]
    fn methods_are_class_scoped() {
        let content = "class A {\n  run() {\n  }\n}\n";
        let symbols = extractor().extract("x.ts", content);
        let method = symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Method)
            .unwrap();
        assert_eq!(method.scope, SymbolScope::Class);
    }
}
