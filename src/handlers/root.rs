//! Welcome page and router fallbacks.

use crate::error::AppError;

/// Text served at `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Product API!";

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Fallback for paths no route matches.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Fallback for a known path called with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
