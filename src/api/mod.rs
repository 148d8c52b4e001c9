//! HTTP API endpoints.

pub mod admin;
pub mod health;
pub mod scan;

use axum::Router;

use crate::AppState;

/// Assemble the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api", scan::router())
        .nest("/admin", admin::router())
        .merge(health::router())
}
