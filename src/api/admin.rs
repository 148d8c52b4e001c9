//! Cache administration endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::CacheHealth;
use crate::AppState;

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cache/health", get(cache_health))
        .route("/cache/clear", post(cache_clear))
}

#[derive(Debug, Serialize)]
struct CacheHealthResponse {
    #[serde(flatten)]
    health: CacheHealth,
    timestamp: DateTime<Utc>,
}

/// Report cache backend health.
async fn cache_health(State(state): State<AppState>) -> Json<CacheHealthResponse> {
    Json(CacheHealthResponse {
        health: state.cache.health().await,
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Deserialize)]
struct ClearRequest {
    pattern: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    timestamp: DateTime<Utc>,
}

/// Clear cache entries matching an optional glob pattern.
async fn cache_clear(
    State(state): State<AppState>,
    request: Option<Json<ClearRequest>>,
) -> Result<Json<ClearResponse>, AppError> {
    let pattern = request.and_then(|Json(r)| r.pattern);
    let cleared = state.cache.clear(pattern.as_deref()).await?;

    Ok(Json(ClearResponse {
        cleared,
        pattern,
        timestamp: Utc::now(),
    }))
}
