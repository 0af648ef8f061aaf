use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a single location produced no reading. Never fatal to a batch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Failure of the persistence layer. Fatal to the batch or query.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Problem with the configured location list.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read locations file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse locations file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid location list: {0}")]
    Invalid(String),
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        // Driver errors can name hosts or constraints; keep them in the log.
        let (status, message) = match &self {
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable"),
        };
        tracing::error!("request failed: {}", self);
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
