use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::relay::RelayError;

/// Boundary-layer error. Causes are logged on conversion; the wire only
/// carries the fixed messages callers depend on.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing query parameter: {0}")]
    MissingQuery(&'static str),

    #[error("no such object key found")]
    NoSuchKey,

    #[error("object key already exists")]
    KeyExists,

    #[error("relay failure")]
    Failure,
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::NotFound(key) => {
                tracing::warn!("object key not found: {}", key);
                ApiError::NoSuchKey
            }
            RelayError::KeyExists(key) => {
                tracing::warn!("refusing to overwrite existing key: {}", key);
                ApiError::KeyExists
            }
            other => {
                tracing::error!("relay failed: {}", other);
                ApiError::Failure
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingQuery(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NoSuchKey => (StatusCode::BAD_REQUEST, "No such object key found"),
            ApiError::KeyExists => (StatusCode::CONFLICT, "failure"),
            ApiError::Failure => (StatusCode::BAD_REQUEST, "failure"),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
