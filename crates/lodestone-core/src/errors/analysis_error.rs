//! Analysis subsystem errors.
//!
//! Per-file read failures are NOT represented here: they degrade to an
//! empty analysis inside the index and never cross the subsystem boundary.

/// Errors that abort an index build or refresh as a whole.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("file enumeration failed: {0}")]
    Enumeration(String),

    #[error("failed to compile extraction pattern: {0}")]
    Pattern(String),

    #[error("analysis cancelled before completion")]
    Cancelled,
}
