use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Domain errors for the retrieval-augmented pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("rag is not enabled")]
    NotEnabled,
    #[error("invalid search limit: {0}")]
    InvalidLimit(i64),
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("document store write failed: {0}")]
    StoreWriteFailed(String),
    #[error("embedding generation failed: {0}")]
    EmbeddingFailed(String),
    #[error("generation stream terminated: {0}")]
    StreamTerminated(String),
}

impl RagError {
    pub fn store_unavailable<E: std::fmt::Display>(err: E) -> Self {
        RagError::StoreUnavailable(err.to_string())
    }

    pub fn store_write<E: std::fmt::Display>(err: E) -> Self {
        RagError::StoreWriteFailed(err.to_string())
    }

    pub fn embedding<E: std::fmt::Display>(err: E) -> Self {
        RagError::EmbeddingFailed(err.to_string())
    }

    pub fn stream<E: std::fmt::Display>(err: E) -> Self {
        RagError::StreamTerminated(err.to_string())
    }
}

/// HTTP-facing errors returned by the server handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::NotEnabled => ApiError::ServiceUnavailable(err.to_string()),
            RagError::InvalidLimit(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
