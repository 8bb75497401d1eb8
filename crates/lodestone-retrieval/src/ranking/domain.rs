//! Domain matching against the static knowledge base.

use super::term_matches;
use crate::domains::DomainKnowledgeBase;
use crate::types::DomainMatch;

/// Score every domain: +2 per concept-word match, +3 per pattern-word
/// match, +4 per technology-word match (substring containment in either
/// direction). Zero-scoring domains are dropped; survivors sort descending
/// (stable, catalogue order breaks ties) and truncate.
pub fn domain_matches(
    knowledge_base: &DomainKnowledgeBase,
    words: &[String],
    max_matches: usize,
) -> Vec<DomainMatch> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<DomainMatch> = Vec::new();
    for domain in knowledge_base.iter() {
        let mut score = 0.0;
        let mut matched_terms: Vec<String> = Vec::new();

        let batteries: [(&[String], f64); 3] = [
            (&domain.concepts, 2.0),
            (&domain.patterns, 3.0),
            (&domain.technologies, 4.0),
        ];
        for (terms, points) in batteries {
            for term in terms {
                if words.iter().any(|word| term_matches(term, word)) {
                    score += points;
                    matched_terms.push(term.clone());
                }
            }
        }

        if score > 0.0 {
            matches.push(DomainMatch {
                domain: domain.name.clone(),
                score,
                matched_terms,
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
