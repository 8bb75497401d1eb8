//! Error handling for lodestone.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod engine_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
