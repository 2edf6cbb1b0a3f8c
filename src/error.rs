use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ApiResponse;

/// User-facing message for every internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something is wrong, please try again";

/// EnrollmentError
///
/// Every way an enrollment request can fail. Each variant maps to exactly one
/// HTTP status; the display text is the envelope's `message`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Missing, malformed or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The principal's role or identity does not grant the operation.
    #[error("{0}")]
    Forbidden(String),

    /// A required field is absent or empty.
    #[error("{0}")]
    BadRequest(String),

    /// The (studentId, courseId) pair is already enrolled.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Unexpected fault. The payload is diagnostic detail, not shown as the message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EnrollmentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            // Duplicates are reported as a plain bad request on the wire.
            Self::BadRequest(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EnrollmentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal fault while handling enrollment request");
                ApiResponse::failure_with_error(INTERNAL_ERROR_MESSAGE, detail)
            }
            other => ApiResponse::failure(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// StoreError
///
/// Failure reported by a collaborating store (enrollments or student directory).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for EnrollmentError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
