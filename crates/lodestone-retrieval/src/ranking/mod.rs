//! Query ranking: semantic matching, related-code expansion, domain
//! matching, suggestion generation, and confidence aggregation.
//!
//! All scoring is deterministic for a fixed index/graph/knowledge base:
//! sorts are stable and ties fall back to index iteration order.

pub mod confidence;
pub mod domain;
pub mod related;
pub mod semantic;
pub mod suggestions;

pub use confidence::compute_confidence;
pub use domain::domain_matches;
pub use related::expand_related;
pub use semantic::semantic_matches;
pub use suggestions::build_suggestions;

/// Query words used for matching: lowercased, length > 2, first-occurrence
/// order, deduplicated.
pub fn query_words(query: &str) -> Vec<String> {
    split_words(query, 2)
}

/// Words used for history relevance: same split, length > 3.
pub fn relevance_words(query: &str) -> Vec<String> {
    split_words(query, 3)
}

fn split_words(text: &str, min_len: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut words: Vec<String> = Vec::new();
    for word in lowered.split(|c: char| !c.is_alphanumeric()) {
        if word.len() > min_len && !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}

/// Substring containment in either direction, case-insensitive on the term
/// side (query words are already lowercase).
pub(crate) fn term_matches(term: &str, word: &str) -> bool {
    let term = term.to_lowercase();
    term.contains(word) || word.contains(&term)
}
