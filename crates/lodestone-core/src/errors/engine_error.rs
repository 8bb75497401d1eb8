//! Engine-boundary errors.

use super::{AnalysisError, ConfigError};

/// Errors that cross the engine boundary.
/// Only initialization-time failures surface here; everything else
/// degrades gracefully and is observable through logs and stats.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("engine is not initialized")]
    NotInitialized,
}
