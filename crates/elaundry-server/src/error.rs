//! HTTP error mapping for the deletion endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use elaundry_core::ElaundryError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    /// Request body lacks one of the required identifiers.
    MissingIdentifiers,
    /// Bearer token missing, invalid, or expired.
    Unauthorized(String),
    /// Token is valid but the caller is not a super-admin.
    Forbidden,
    /// Any backend failure, including partial completion of the deletion
    /// steps. The underlying message is passed through.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MissingIdentifiers => {
                (StatusCode::BAD_REQUEST, "Missing userId or shopId".to_string())
            }
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Super-admin role required".to_string(),
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<ElaundryError> for ApiError {
    fn from(err: ElaundryError) -> Self {
        match err {
            ElaundryError::MissingIdentifiers => ApiError::MissingIdentifiers,
            // Strip the taxonomy wrapper: the client gets the backend's own
            // message.
            ElaundryError::Provider(message) => ApiError::Internal(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
