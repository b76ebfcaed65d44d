//! Typed API error for the JSON endpoints.
//!
//! Converts service errors into HTTP responses with a JSON body and status
//! code. The HTML pages report failures inline instead.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use namebook_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 409 Conflict: a case-insensitive duplicate name.
    Conflict(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: the store could not be read.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(_) => Self::BadRequest(err.user_message()),
            ServiceError::DuplicateName(_) => Self::Conflict(err.user_message()),
            ServiceError::Storage(_) if err.is_transient() => {
                Self::ServiceUnavailable(err.user_message())
            },
            ServiceError::Storage(_) => Self::Internal(err.into()),
        }
    }
}
