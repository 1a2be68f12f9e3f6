//! Error types for the backend crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use beacon_core::CoreError;
use serde_json::json;

/// Errors that can occur while handling a backend request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The request carried no usable body.
    #[error("{0}")]
    BadRequest(String),

    /// Any other failure during handler execution. The description is
    /// returned to the client as-is.
    #[error("{0}")]
    Internal(String),
}

impl From<CoreError> for BackendError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyPayload => BackendError::BadRequest(err.to_string()),
            _ => BackendError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            BackendError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BackendError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
