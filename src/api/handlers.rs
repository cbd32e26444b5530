//! API Handlers
//!
//! HTTP request handlers for each Warrity service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::fetch::Fetcher;
use crate::models::requests::resolve_now;
use crate::models::{
    annotate_by_urgency, ClearResponse, GetResponse, HealthResponse, InvalidateResponse,
    SetRequest, SetResponse, StatsResponse, StatusRequest, SummaryRequest, SummaryResponse,
};
use crate::status::{derive_status, StatusReport};

/// Shared handle to the response cache.
pub type SharedCache = Arc<RwLock<TtlCache<serde_json::Value>>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: TtlCache<serde_json::Value>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TtlCache::new(config.default_ttl()))
    }

    /// A fetcher reading through this state's cache.
    pub fn fetcher(&self) -> Fetcher<serde_json::Value> {
        Fetcher::new(Arc::clone(&self.cache))
    }
}

/// Handler for PUT /cache
///
/// Stores a JSON payload under a caller-chosen key.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let ttl = req
        .ttl
        .map(Duration::from_secs)
        .unwrap_or_else(|| cache.default_ttl());
    cache.set_with_ttl(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key, ttl.as_secs())))
}

/// Handler for GET /cache/:key
///
/// Returns the payload if it is still fresh.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a stale entry is purged on read
    let mut cache = state.cache.write().await;
    let value = cache
        .get_cloned(&key)
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;
    let ttl_remaining = cache.ttl_remaining(&key).unwrap_or_default().as_secs();

    Ok(Json(GetResponse::new(key, value, ttl_remaining)))
}

/// Handler for DELETE /cache/:key
///
/// Invalidating an absent key is not an error.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.fetcher().invalidate(&key).await;
    debug!(key = %key, removed, "invalidate requested");

    Json(InvalidateResponse { key, removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.write().await.clear();
    debug!(removed, "cache cleared");

    Json(ClearResponse { removed })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for POST /status
///
/// Derives the status of a single end date.
pub async fn status_handler(Json(req): Json<StatusRequest>) -> Result<Json<StatusReport>> {
    let now = resolve_now(req.now.as_deref()).map_err(ApiError::InvalidRequest)?;
    Ok(Json(derive_status(req.expiry_date.as_deref(), &now)))
}

/// Handler for POST /warranties/summary
///
/// Annotates a batch of warranties and tallies them by status.
pub async fn summary_handler(Json(req): Json<SummaryRequest>) -> Result<Json<SummaryResponse>> {
    let now = resolve_now(req.now.as_deref()).map_err(ApiError::InvalidRequest)?;
    let views = annotate_by_urgency(req.warranties, &now);

    Ok(Json(SummaryResponse::new(views)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
