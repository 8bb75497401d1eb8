//! The `ContextEngine` facade.
//!
//! Owns the semantic index, the relationship graph, the domain knowledge
//! base, the context cache, and the history log; callers never mutate any
//! of them directly. Concurrent `retrieve` calls against a stable index
//! are safe; `refresh` builds a new graph aside and publishes it in one
//! swap under the write lock, so readers never observe half-updated edges.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

use lodestone_analysis::enumerate::FileEnumerator;
use lodestone_analysis::graph::{CodeRelationship, RelationshipGraph};
use lodestone_analysis::index::SemanticIndex;
use lodestone_analysis::lexical::SemanticAnalysis;
use lodestone_core::config::EngineConfig;
use lodestone_core::errors::EngineError;
use lodestone_core::traits::CancellationToken;

use crate::cache::{CacheStats, ContextCache};
use crate::domains::DomainKnowledgeBase;
use crate::history::HistoryLog;
use crate::ranking::{
    build_suggestions, compute_confidence, domain_matches, expand_related, query_words,
    relevance_words, semantic_matches,
};
use crate::types::{EnhancedContext, HistoricalContext, RetrievalOptions};

/// Longest result prefix kept in a history entry's summary.
const HISTORY_SUMMARY_CHARS: usize = 200;

struct EngineState {
    index: SemanticIndex,
    graph: Arc<RelationshipGraph>,
    domains: DomainKnowledgeBase,
}

/// The semantic context retrieval engine.
///
/// Construct with [`ContextEngine::new`], then call [`initialize`] before
/// anything else; every operation on an uninitialized engine reports
/// [`EngineError::NotInitialized`].
///
/// [`initialize`]: ContextEngine::initialize
pub struct ContextEngine {
    config: EngineConfig,
    enumerator: Arc<dyn FileEnumerator>,
    state: RwLock<Option<EngineState>>,
    cache: Mutex<ContextCache>,
    history: Mutex<HistoryLog>,
    ranking_runs: AtomicU64,
}

impl ContextEngine {
    pub fn new(enumerator: Arc<dyn FileEnumerator>, config: EngineConfig) -> Self {
        let cache_ttl = Duration::from_millis(config.cache.effective_cache_expiration_ms());
        let history_bound = config.history.effective_max_history_entries();
        Self {
            config,
            enumerator,
            state: RwLock::new(None),
            cache: Mutex::new(ContextCache::new(cache_ttl)),
            history: Mutex::new(HistoryLog::new(history_bound)),
            ranking_runs: AtomicU64::new(0),
        }
    }

    /// Build the knowledge base, the index, and the graph.
    ///
    /// Failures here are fatal: the engine stays unusable and `is_ready`
    /// keeps reporting false.
    pub fn initialize(&self) -> Result<(), EngineError> {
        let token = self.analysis_token();
        let mut index = SemanticIndex::new()?;
        let enumerator = Arc::clone(&self.enumerator);
        self.run_on_analysis_pool(|| index.build(enumerator.as_ref(), &token))?;
        let graph = Arc::new(RelationshipGraph::build(&index));
        let domains = DomainKnowledgeBase::builtin();

        *self.write_state() = Some(EngineState {
            index,
            graph,
            domains,
        });
        tracing::info!("context engine initialized");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.read_state().is_some()
    }

    /// Retrieve ranked context for `query` with default options.
    pub fn retrieve(&self, query: &str) -> Result<EnhancedContext, EngineError> {
        self.retrieve_with(query, &RetrievalOptions::default())
    }

    /// Retrieve ranked context for `query`.
    pub fn retrieve_with(
        &self,
        query: &str,
        options: &RetrievalOptions,
    ) -> Result<EnhancedContext, EngineError> {
        let caching = self.config.cache.effective_enable_caching();
        let key = ContextCache::cache_key(query, options);
        if caching {
            if let Some(hit) = self.lock_cache().get(&key) {
                tracing::debug!(query, "context cache hit");
                return Ok(hit);
            }
        }

        let guard = self.read_state();
        let state = guard.as_ref().ok_or(EngineError::NotInitialized)?;
        self.ranking_runs.fetch_add(1, Ordering::Relaxed);

        let words = query_words(query);
        let max_semantic = options
            .max_semantic_matches
            .unwrap_or_else(|| self.config.retrieval.effective_max_semantic_matches());
        let max_domains = options
            .max_domain_matches
            .unwrap_or_else(|| self.config.retrieval.effective_max_domain_matches());
        let max_suggestions = options
            .max_suggestions
            .unwrap_or_else(|| self.config.retrieval.effective_max_suggestions());

        let matches = semantic_matches(&state.index, &words, max_semantic);
        let related_code = expand_related(&matches, &state.graph);
        let domain_context = domain_matches(&state.domains, &words, max_domains);

        let historical_context = if self.config.history.effective_enable_historical_tracking() {
            let matched_files: Vec<String> =
                matches.iter().map(|m| m.file_path.clone()).collect();
            let limit = self
                .config
                .history
                .effective_max_history_entries()
                .min(5);
            self.lock_history()
                .relevant(&relevance_words(query), &matched_files, limit)
        } else {
            Vec::new()
        };

        let suggestions = build_suggestions(
            &matches,
            &state.graph,
            &state.domains,
            &domain_context,
            &historical_context,
            max_suggestions,
        );
        let confidence = compute_confidence(
            &matches,
            &domain_context,
            &related_code,
            !historical_context.is_empty(),
        );

        let context = EnhancedContext {
            query: query.to_string(),
            semantic_matches: matches,
            related_code,
            domain_context,
            historical_context,
            suggestions,
            confidence,
        };
        drop(guard);

        if caching {
            self.lock_cache().insert(key, context.clone());
        }
        Ok(context)
    }

    /// Record a consumed result; the caller decides when a result counted.
    pub fn add_to_history(&self, query: &str, result: &str, files_referenced: Vec<String>) {
        if !self.config.history.effective_enable_historical_tracking() {
            return;
        }
        let result_summary: String = result.chars().take(HISTORY_SUMMARY_CHARS).collect();
        self.lock_history().push(HistoricalContext {
            timestamp: SystemTime::now(),
            query: query.to_string(),
            result_summary,
            files_referenced,
            context_used: true,
        });
    }

    pub fn get_file_analysis(&self, path: &str) -> Option<SemanticAnalysis> {
        self.read_state()
            .as_ref()
            .and_then(|state| state.index.get(path).cloned())
    }

    pub fn get_file_relationships(&self, path: &str) -> Option<CodeRelationship> {
        self.read_state()
            .as_ref()
            .and_then(|state| state.graph.get(path).cloned())
    }

    /// Re-analyze the given paths (or rebuild the whole index for `None`),
    /// then rebuild the graph and publish it in one swap.
    pub fn refresh(&self, paths: Option<&[String]>) -> Result<(), EngineError> {
        let token = self.analysis_token();
        let enumerator = Arc::clone(&self.enumerator);
        let mut guard = self.write_state();
        let state = guard.as_mut().ok_or(EngineError::NotInitialized)?;

        let index = &mut state.index;
        self.run_on_analysis_pool(|| match paths {
            None => index.build(enumerator.as_ref(), &token),
            Some(paths) => index.refresh(paths, enumerator.as_ref(), &token),
        })?;
        state.graph = Arc::new(RelationshipGraph::build(&state.index));
        Ok(())
    }

    /// Drop the index, graph, cache, and history. `is_ready` reports false
    /// afterwards; `initialize` may be called again.
    pub fn close(&self) {
        *self.write_state() = None;
        self.lock_cache().clear();
        self.lock_history().clear();
        tracing::info!("context engine closed");
    }

    /// Number of full ranking computations run (cache hits excluded).
    pub fn ranking_runs(&self) -> u64 {
        self.ranking_runs.load(Ordering::Relaxed)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    fn analysis_token(&self) -> CancellationToken {
        match self.config.analysis.analysis_timeout_ms {
            Some(ms) => CancellationToken::with_timeout(Duration::from_millis(ms)),
            None => CancellationToken::new(),
        }
    }

    /// Run `f` on a dedicated rayon pool when `analysis.threads` is set.
    fn run_on_analysis_pool<T: Send>(&self, f: impl FnOnce() -> T + Send) -> T {
        match self.config.analysis.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
            {
                Ok(pool) => pool.install(f),
                Err(error) => {
                    tracing::warn!(%error, "failed to build analysis pool, using the global one");
                    f()
                }
            },
            None => f(),
        }
    }

    // Poisoned locks are recovered, not propagated: a panicking reader
    // cannot corrupt the index/graph/cache, only abandon them mid-read.
    fn read_state(&self) -> RwLockReadGuard<'_, Option<EngineState>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<EngineState>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_cache(&self) -> MutexGuard<'_, ContextCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryLog> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}
