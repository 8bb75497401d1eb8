//! Lexical complexity metrics.

use lodestone_core::errors::AnalysisError;
use regex::Regex;

use super::types::ComplexityMetrics;

/// Counts branching and function-introducer tokens.
///
/// `else if` counts both tokens and `switch`/`case` both count; this is a
/// lexical approximation, consistent across files, not a CFG measure.
pub struct ComplexityMeasurer {
    condition_re: Regex,
    function_re: Regex,
}

impl ComplexityMeasurer {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            condition_re: Regex::new(
                r"\b(?:if|else|for|while|case|catch|switch)\b|&&|\|\|",
            )
            .map_err(|e| AnalysisError::Pattern(e.to_string()))?,
            function_re: Regex::new(r"\bfunction\b|=>|\bdef\b|\bfn\b")
                .map_err(|e| AnalysisError::Pattern(e.to_string()))?,
        })
    }

    pub fn measure(&self, content: &str) -> ComplexityMetrics {
        let lines = content.lines().filter(|l| !l.trim().is_empty()).count();
        let conditions = self.condition_re.find_iter(content).count();
        let functions = self.function_re.find_iter(content).count();
        let cyclomatic_complexity = conditions + functions + 1;
        let maintainability_index = (171.0
            - 5.2 * (lines.max(1) as f64).ln()
            - 0.23 * cyclomatic_complexity as f64)
            .max(0.0);

        ComplexityMetrics {
            lines,
            conditions,
            functions,
            cyclomatic_complexity,
            maintainability_index,
        }
    }
}
