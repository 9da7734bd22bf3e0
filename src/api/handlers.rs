//! API Handlers
//!
//! HTTP handlers for inspecting and clearing the response cache.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CachedValueResponse, ClearResponse, HealthResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide response cache
    pub cache: ResponseCache,
}

impl AppState {
    pub fn new(cache: ResponseCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with an empty cache using the configured default TTL.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ResponseCache::new(config.default_ttl()))
    }
}

/// Handler for GET /api/cache/:key
///
/// Reads through the normal cache path, so an expired entry is purged and
/// reported as not found.
pub async fn get_cached_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CachedValueResponse>> {
    match state.cache.get_with_ttl(&key).await {
        Some((value, expires_in)) => Ok(Json(CachedValueResponse::new(key, value, expires_in))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /api/cache/:key
///
/// Clearing an absent key is not an error.
pub async fn clear_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ClearResponse> {
    let removed = state.cache.clear(Some(&key)).await;
    Json(ClearResponse::key(&key, removed))
}

/// Handler for DELETE /api/cache
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear(None).await;
    Json(ClearResponse::all(removed))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
