//! Semantic matching: score index entries against query words.

use lodestone_analysis::index::SemanticIndex;

use super::term_matches;
use crate::types::SemanticMatch;

/// Score every indexed file against the query words.
///
/// Per file: +10 per symbol whose name contains or is contained by a query
/// word, + confidence x 5 per matched concept, + confidence x 3 per matched
/// pattern; the running total is multiplied by 1.2 when cyclomatic
/// complexity exceeds 5. Files scoring zero are dropped; survivors are
/// sorted descending (stable, so path order breaks ties) and truncated.
pub fn semantic_matches(
    index: &SemanticIndex,
    words: &[String],
    max_matches: usize,
) -> Vec<SemanticMatch> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SemanticMatch> = Vec::new();
    for (path, analysis) in index.iter() {
        let mut score = 0.0;
        let mut matched_symbols = Vec::new();
        let mut matched_concepts = Vec::new();

        for symbol in &analysis.symbols {
            if words.iter().any(|word| term_matches(&symbol.name, word)) {
                score += 10.0;
                matched_symbols.push(symbol.clone());
            }
        }
        for concept in &analysis.concepts {
            if words.iter().any(|word| term_matches(&concept.name, word)) {
                score += concept.confidence * 5.0;
                matched_concepts.push(concept.clone());
            }
        }
        for pattern in &analysis.patterns {
            if words.iter().any(|word| term_matches(&pattern.name, word)) {
                score += pattern.confidence * 3.0;
            }
        }
        if analysis.complexity.cyclomatic_complexity > 5 {
            score *= 1.2;
        }

        if score > 0.0 {
            matches.push(SemanticMatch {
                file_path: path.clone(),
                score,
                matched_symbols,
                matched_concepts,
            });
        }
    }

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(max_matches);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::query_words;
    use lodestone_analysis::enumerate::StaticFileEnumerator;
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
    fn symbol_hits_dominate_scoring() {
        let index = index_of(&[
            ("orders.ts", "export function processOrder(order) {}"),
            ("misc.ts", "export const unrelated = 1;"),
        ]);
        let matches = semantic_matches(&index, &query_words("order processing"), 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file_path, "orders.ts");
        assert!(matches[0]
            .matched_symbols
            .iter()
            .any(|s| s.name == "processOrder"));
        assert!(matches[0].score >= 10.0);
    }

    #[test]
    fn complexity_multiplier_applies_above_five() {
        let simple = "export function orderTotal() { return 1; }\n";
        let complex = concat!(
            "export function orderTotal(items) {\n",
            "  if (a && b) { return 1; }\n",
            "  if (c || d) { return 2; }\n",
            "  for (const i of items) { while (i) { break; } }\n",
            "  return 0;\n",
            "}\n",
        );
        let index = index_of(&[("simple.ts", simple), ("complex.ts", complex)]);
        let matches = semantic_matches(&index, &query_words("orderTotal"), 10);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].file_path, "complex.ts");
        assert!(matches[0].score > matches[1].score);
    }

    #[test]
    fn no_matching_words_no_matches() {
        let index = index_of(&[("a.ts", "export const widget = 1;")]);
        assert!(semantic_matches(&index, &query_words("zebra quantum"), 10).is_empty());
    }

    #[test]
    fn empty_word_list_short_circuits() {
        let index = index_of(&[("a.ts", "export const widget = 1;")]);
        assert!(semantic_matches(&index, &[], 10).is_empty());
    }

    #[test]
    fn results_truncate_to_limit() {
        let files: Vec<(String, String)> = (0..6)
            .map(|i| {
                (
                    format!("f{i}.ts"),
                    "export function orderHandler() {}".to_string(),
                )
            })
            .collect();
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let index = index_of(&refs);
        let matches = semantic_matches(&index, &query_words("order"), 3);
        assert_eq!(matches.len(), 3);
        // Stable sort: equal scores keep path order.
        assert_eq!(matches[0].file_path, "f0.ts");
    }
}
