use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types.
///
/// `Validation` and `InvalidParameter` are fatal for the computation that
/// raised them. `Cache` is soft: call sites downgrade it to a cache miss.
/// `DataFetch` becomes a per-symbol error entry; a batch scan never aborts
/// because of one.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Data fetch failed for {symbol}: {message}")]
    DataFetch { symbol: String, message: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Construct a field-scoped validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Construct a per-symbol data fetch error.
    pub fn data_fetch(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataFetch {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidParameter(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DataFetch { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Cache(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::SerdeJson(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
