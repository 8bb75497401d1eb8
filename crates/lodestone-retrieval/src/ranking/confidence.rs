//! Aggregate confidence for a retrieval result.

use crate::types::{DomainMatch, SemanticMatch};

/// Top semantic score that maps to full semantic strength.
const SEMANTIC_SATURATION: f64 = 50.0;
/// Top domain score that maps to full domain strength.
const DOMAIN_SATURATION: f64 = 20.0;
/// Related-file count that maps to full related-code volume.
const RELATED_SATURATION: f64 = 10.0;

/// Weighted sum: semantic strength 40%, top domain strength 30%, related
/// volume 20%, history presence a flat 10%. Every sub-term is clamped to
/// [0, 1] before weighting, so the result is always in [0, 1].
pub fn compute_confidence(
    semantic: &[SemanticMatch],
    domains: &[DomainMatch],
    related: &[String],
    has_history: bool,
) -> f64 {
    let semantic_strength = semantic
        .first()
        .map(|m| (m.score / SEMANTIC_SATURATION).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let domain_strength = domains
        .first()
        .map(|m| (m.score / DOMAIN_SATURATION).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let related_volume = (related.len() as f64 / RELATED_SATURATION).clamp(0.0, 1.0);
    let history_presence = if has_history { 1.0 } else { 0.0 };

    0.4 * semantic_strength + 0.3 * domain_strength + 0.2 * related_volume + 0.1 * history_presence
}
