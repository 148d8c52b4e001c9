//! Scan API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::types::{ScanReport, ScanRequest, ScanResponse};
use crate::AppState;

/// Query parameters for a single-symbol scan.
#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub interval: Option<String>,
    pub bars: Option<usize>,
}

/// Create the scan router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scan", post(scan_batch))
        .route("/scan/:symbol", get(scan_symbol))
}

/// Scan a batch of symbols. Per-symbol failures appear as error entries;
/// the response itself always succeeds.
async fn scan_batch(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    if request.symbols.is_empty() {
        return Err(AppError::validation("symbols", "symbol list cannot be empty"));
    }

    let response = state
        .scanner
        .scan(&request.symbols, &request.interval, request.bars)
        .await;
    Ok(Json(response))
}

/// Scan one symbol.
async fn scan_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanReport>, AppError> {
    let interval = query
        .interval
        .unwrap_or_else(|| state.config.default_interval.clone());
    let bars = query.bars.unwrap_or(state.config.default_bars);

    let report = state.scanner.scan_symbol(&symbol, &interval, bars).await?;
    Ok(Json(report))
}
