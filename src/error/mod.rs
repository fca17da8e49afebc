/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers and its
 * conversion to HTTP responses.
 *
 * # Error Tiers
 *
 * There are only two tiers of errors surfaced to clients:
 *
 * - Validation/business errors with a fixed message ("User with this
 *   email already exists", "Post not found", "Already liked this post"),
 *   mapped to 4xx status codes.
 * - Everything else: adapter and storage failures are logged at the site
 *   where they occur and converted into a generic 500.
 *
 * AI adapter operations never produce errors at all - they degrade to
 * fixed defaults inside the adapter (see `crate::ai`).
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// API error returned by request handlers
///
/// Each variant maps to an HTTP status code and carries a client-facing
/// message. Internal details stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation or business-rule violation (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (403)
    #[error("{0}")]
    Forbidden(String),

    /// Entity does not exist or is not visible (404)
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected (500); clients only see a generic message
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Document store error: {err}");
        Self::Internal("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    /// Convert an API error into an HTTP response
    ///
    /// The response body is a JSON object with a single `detail` field
    /// carrying the client-facing message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "detail": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::bad_request("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("no").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_preserved() {
        let err = ApiError::bad_request("Post contains inappropriate content");
        assert_eq!(err.to_string(), "Post contains inappropriate content");
    }

    #[test]
    fn test_store_error_is_generic() {
        let err: ApiError = StoreError::request("connection refused").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }
}
