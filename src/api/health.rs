//! Liveness endpoint.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::CacheStatus;
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    cache: CacheStatus,
    timestamp: DateTime<Utc>,
}

/// Create the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Service liveness plus a cache status summary. A degraded cache does not
/// make the service unhealthy; scans keep working against the fallback.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache.health().await;
    Json(HealthResponse {
        status: "healthy",
        cache: cache.status,
        timestamp: Utc::now(),
    })
}
