use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures reaching or decoding the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("task store returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("task store timed out after {0}ms")]
    Timeout(u64),
    #[error("unexpected task store payload: {0}")]
    Decode(String),
    #[error("task {0} not found")]
    NotFound(String),
}

/// Failures of the optional generative backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("generative backend not configured")]
    Unavailable,
    #[error("generative backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generative backend returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("generative backend returned an empty completion")]
    Empty,
    #[error("generative backend produced no usable JQL")]
    NoJql,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Backend(#[from] LlmError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Errors surfaced by the HTTP layer. Pipeline failures never end up here,
/// only request validation and lookups of ids that do not exist.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("Task with ID {id} not found")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
