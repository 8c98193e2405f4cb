//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis;
use crate::cache::{MemoryStore, TitleSuggestionCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    AnalysisData, HealthResponse, StatsResponse, SuggestTitlesRequest, SuggestTitlesResponse,
};
use crate::orchestrator::SuggestionOrchestrator;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aware backend fan-out
    pub orchestrator: Arc<SuggestionOrchestrator>,
    /// In-memory store behind the cache, exposed for stats and cleanup
    pub store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new AppState from an orchestrator and the store it caches into.
    pub fn new(orchestrator: SuggestionOrchestrator, store: Arc<MemoryStore>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            store,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the in-memory store, the cache in front of it and both backends.
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(MemoryStore::new(config.max_entries));
        let cache =
            TitleSuggestionCache::with_ttl(store.clone(), Duration::from_secs(config.cache_ttl));
        let orchestrator = SuggestionOrchestrator::from_config(config, cache);
        Self::new(orchestrator, store)
    }
}

/// Handler for POST /api/suggest-titles/
///
/// Validates the blog post, runs the backends behind the cache and attaches
/// content analysis when requested. Unreadable bodies get the same JSON
/// error shape as validation failures.
pub async fn suggest_titles_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SuggestTitlesRequest>, JsonRejection>,
) -> Result<Json<SuggestTitlesResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;
    let content = req.validate().map_err(ApiError::InvalidRequest)?;

    let id = Uuid::new_v4();
    info!(request_id = %id, chars = content.chars().count(), "Suggesting titles");

    let analysis = req.wants_analysis().then(|| match analysis::analyze(content) {
        Ok(analysis) => AnalysisData::from(analysis),
        Err(e) => {
            warn!(request_id = %id, "Content analysis failed: {}", e);
            AnalysisData::failed()
        }
    });

    let outcome = state.orchestrator.suggest(content).await.map_err(|e| {
        error!(request_id = %id, "{}", e);
        ApiError::GenerationFailed(e.to_string())
    })?;

    Ok(Json(SuggestTitlesResponse {
        id,
        suggestions: outcome.suggestions,
        analysis,
        warnings: outcome.warnings,
    }))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
