//! Error taxonomy and the terminal error formatter.
//!
//! Every failure raised anywhere in the request pipeline is an [`AppError`].
//! Handlers and stages never write error responses themselves: they return
//! (or short-circuit with) an `AppError`, and [`IntoResponse`] turns it into
//! the uniform envelope:
//!
//! ```json
//! { "error": "NotFoundError", "message": "Product not found" }
//! ```
//!
//! Server-side failures keep their detail in the log and return a generic
//! message to the caller.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics;

/// Message returned for any product lookup miss.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Message returned for any rejected product payload.
pub const INVALID_PRODUCT_DATA: &str = "Invalid product data";

/// Message returned for rejected `page`/`limit` values.
pub const INVALID_PAGINATION: &str = "Invalid pagination parameters";

/// Message returned when the API key is missing or wrong.
pub const INVALID_API_KEY: &str = "Unauthorized: Invalid API key";

/// Message returned in place of any internal error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-wide error kinds with their HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// The not-found error every product route raises for an unknown id.
    pub fn product_not_found() -> Self {
        Self::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    /// The validation error raised for any malformed product payload.
    pub fn invalid_product() -> Self {
        Self::Validation(INVALID_PRODUCT_DATA.to_string())
    }

    /// HTTP status associated with this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Kind name written to the `error` field of the envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFoundError",
            AppError::Validation(_) => "ValidationError",
            AppError::Unauthorized(_) => "UnauthorizedError",
            AppError::MethodNotAllowed => "MethodNotAllowedError",
            AppError::PayloadTooLarge => "PayloadTooLargeError",
            AppError::Internal(_) | AppError::Config(_) => "InternalServerError",
        }
    }

    /// Message safe to hand back to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Unauthorized(msg) => {
                msg.clone()
            }
            AppError::MethodNotAllowed | AppError::PayloadTooLarge => self.to_string(),
            AppError::Internal(_) | AppError::Config(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Uniform error envelope for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        if status.is_server_error() {
            tracing::error!(error = %self, kind, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, kind, status = status.as_u16(), "Request rejected");
        }
        metrics::record_error(kind);

        let body = ErrorResponse {
            error: kind.to_string(),
            message: self.public_message(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            tracing::debug!(reason = %rejection.body_text(), "Product body rejected");
            AppError::invalid_product()
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Query string rejected");
        AppError::Validation(INVALID_PAGINATION.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    async fn envelope(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = envelope(AppError::product_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            ErrorResponse {
                error: "NotFoundError".to_string(),
                message: "Product not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let (status, body) = envelope(AppError::invalid_product()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "ValidationError");
        assert_eq!(body.message, "Invalid product data");
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let (status, body) = envelope(AppError::Internal("lock poisoned at 0x1".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "InternalServerError");
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized(INVALID_API_KEY.into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Config("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
