//! API error handling.
//!
//! Every failure is rendered as `{"error": "<message>"}` with the status code
//! chosen from the error kind:
//!
//! | Kind | Status |
//! |---|---|
//! | malformed body, missing or invalid id | 400 |
//! | unreadable body (e.g. over the size limit) | as assigned by axum |
//! | no task matched the id | 404 |
//! | store failure or timeout | 500 |

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorResponse;
use crate::repository::RepositoryError;

/// An HTTP error response.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        if error.is_client_error() {
            tracing::warn!(error = %error, "Rejected task request");
        } else {
            tracing::error!(error = %error, "Task store failure");
        }

        match &error {
            RepositoryError::InvalidId(_) => Self::bad_request(error.to_string()),
            RepositoryError::NotFound(_) => Self::not_found("Task not found"),
            RepositoryError::Timeout { .. }
            | RepositoryError::Store(_)
            | RepositoryError::Decode { .. } => Self::internal(error.to_string()),
        }
    }
}

/// A body that could not be read keeps axum's status (413 over the limit).
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// A body that was read but does not decode as the expected type.
impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::bad_request(format!("Failed to parse the request body as JSON: {}", error))
    }
}
