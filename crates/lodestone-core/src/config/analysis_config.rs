//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for file enumeration and lexical analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum file size in bytes considered for analysis. Default: 1 MiB.
    pub max_file_size: Option<u64>,
    /// Worker threads for the per-file analysis fan-out.
    /// Default: rayon's choice (number of cores).
    pub threads: Option<usize>,
    /// Wall-clock budget for a whole build/refresh, in milliseconds.
    /// Default: none (unbounded).
    pub analysis_timeout_ms: Option<u64>,
}

impl AnalysisConfig {
    /// Returns the effective maximum file size, defaulting to 1 MiB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }
}
