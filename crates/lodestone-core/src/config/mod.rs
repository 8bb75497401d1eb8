//! Configuration system for lodestone.
//! TOML-based, layered resolution: programmatic overrides > env > project file > defaults.

pub mod analysis_config;
pub mod cache_config;
pub mod engine_config;
pub mod history_config;
pub mod retrieval_config;

pub use analysis_config::AnalysisConfig;
pub use cache_config::CacheConfig;
pub use engine_config::{EngineConfig, EngineOverrides};
pub use history_config::HistoryConfig;
pub use retrieval_config::RetrievalConfig;
