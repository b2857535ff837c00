use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ServiceError;

/// Service failure carried out of a handler. Maps the taxonomy onto the wire
/// contract: validation and unknown-student failures are the caller's fault
/// (400); everything touching storage is reported generically (500) with the
/// detail kept in the log.
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ServiceError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ServiceError::Conflict(msg) => {
                tracing::error!("conflict: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
            ServiceError::PartialWrite {
                applied,
                subject,
                source,
            } => {
                tracing::error!(
                    "marks write failed on subject '{subject}' after {applied} applied: {source}"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error adding/modifying marks.".to_string(),
                )
                    .into_response()
            }
            ServiceError::Storage(e) => {
                tracing::error!("storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error encountered while processing the request.".to_string(),
                )
                    .into_response()
            }
        }
    }
}
