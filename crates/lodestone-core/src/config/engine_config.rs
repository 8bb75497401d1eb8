//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, CacheConfig, HistoryConfig, RetrievalConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LODESTONE_*`)
/// 3. Project config (`lodestone.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub analysis: AnalysisConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
}

/// Programmatic override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct EngineOverrides {
    pub max_semantic_matches: Option<usize>,
    pub max_domain_matches: Option<usize>,
    pub max_suggestions: Option<usize>,
    pub max_history_entries: Option<usize>,
    pub cache_expiration_ms: Option<u64>,
    pub enable_caching: Option<bool>,
    pub enable_historical_tracking: Option<bool>,
    pub analysis_timeout_ms: Option<u64>,
}

impl EngineConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. Programmatic overrides
    /// 2. Environment variables (`LODESTONE_*`)
    /// 3. Project config (`lodestone.toml` in `root`)
    /// 4. Compiled defaults
    pub fn load(root: &Path, overrides: Option<&EngineOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join("lodestone.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): programmatic overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn merge_toml_file(config: &mut Self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let file_config: Self = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.merge_from(file_config);
        Ok(())
    }

    /// Merge `other` into `self`: fields set in `other` win.
    fn merge_from(&mut self, other: Self) {
        self.analysis.max_file_size = other.analysis.max_file_size.or(self.analysis.max_file_size);
        self.analysis.threads = other.analysis.threads.or(self.analysis.threads);
        self.analysis.analysis_timeout_ms = other
            .analysis
            .analysis_timeout_ms
            .or(self.analysis.analysis_timeout_ms);
        self.retrieval.max_semantic_matches = other
            .retrieval
            .max_semantic_matches
            .or(self.retrieval.max_semantic_matches);
        self.retrieval.max_domain_matches = other
            .retrieval
            .max_domain_matches
            .or(self.retrieval.max_domain_matches);
        self.retrieval.max_suggestions = other
            .retrieval
            .max_suggestions
            .or(self.retrieval.max_suggestions);
        self.cache.enable_caching = other.cache.enable_caching.or(self.cache.enable_caching);
        self.cache.cache_expiration_ms = other
            .cache
            .cache_expiration_ms
            .or(self.cache.cache_expiration_ms);
        self.history.enable_historical_tracking = other
            .history
            .enable_historical_tracking
            .or(self.history.enable_historical_tracking);
        self.history.max_history_entries = other
            .history
            .max_history_entries
            .or(self.history.max_history_entries);
    }

    fn apply_env_overrides(config: &mut Self) {
        fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
            let raw = std::env::var(key).ok()?;
            match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key, raw = %raw, "ignoring unparseable environment override");
                    None
                }
            }
        }

        if let Some(v) = parse_env("LODESTONE_MAX_FILE_SIZE") {
            config.analysis.max_file_size = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_ANALYSIS_THREADS") {
            config.analysis.threads = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_ANALYSIS_TIMEOUT_MS") {
            config.analysis.analysis_timeout_ms = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_MAX_SEMANTIC_MATCHES") {
            config.retrieval.max_semantic_matches = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_MAX_DOMAIN_MATCHES") {
            config.retrieval.max_domain_matches = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_MAX_SUGGESTIONS") {
            config.retrieval.max_suggestions = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_ENABLE_CACHING") {
            config.cache.enable_caching = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_CACHE_EXPIRATION_MS") {
            config.cache.cache_expiration_ms = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_ENABLE_HISTORICAL_TRACKING") {
            config.history.enable_historical_tracking = Some(v);
        }
        if let Some(v) = parse_env("LODESTONE_MAX_HISTORY_ENTRIES") {
            config.history.max_history_entries = Some(v);
        }
    }

    fn apply_overrides(config: &mut Self, overrides: &EngineOverrides) {
        if overrides.max_semantic_matches.is_some() {
            config.retrieval.max_semantic_matches = overrides.max_semantic_matches;
        }
        if overrides.max_domain_matches.is_some() {
            config.retrieval.max_domain_matches = overrides.max_domain_matches;
        }
        if overrides.max_suggestions.is_some() {
            config.retrieval.max_suggestions = overrides.max_suggestions;
        }
        if overrides.max_history_entries.is_some() {
            config.history.max_history_entries = overrides.max_history_entries;
        }
        if overrides.cache_expiration_ms.is_some() {
            config.cache.cache_expiration_ms = overrides.cache_expiration_ms;
        }
        if overrides.enable_caching.is_some() {
            config.cache.enable_caching = overrides.enable_caching;
        }
        if overrides.enable_historical_tracking.is_some() {
            config.history.enable_historical_tracking = overrides.enable_historical_tracking;
        }
        if overrides.analysis_timeout_ms.is_some() {
            config.analysis.analysis_timeout_ms = overrides.analysis_timeout_ms;
        }
    }

    fn validate(config: &Self) -> Result<(), ConfigError> {
        if config.analysis.max_file_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "analysis.max_file_size",
                message: "must be greater than zero".to_string(),
            });
        }
        if config.analysis.threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "analysis.threads",
                message: "must be greater than zero".to_string(),
            });
        }
        if config.retrieval.max_semantic_matches == Some(0) {
            return Err(ConfigError::Invalid {
                field: "retrieval.max_semantic_matches",
                message: "must be greater than zero".to_string(),
            });
        }
        if config.retrieval.max_domain_matches == Some(0) {
            return Err(ConfigError::Invalid {
                field: "retrieval.max_domain_matches",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
