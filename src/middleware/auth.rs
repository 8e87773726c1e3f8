//! API key authentication stage.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Header only**: The key is read from `X-API-Key`; query parameters are ignored
//! - **Selective protection**: Paths in `AUTH_BYPASS_PATHS` (default `/`) skip the check
//!
//! # Usage
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! curl -H "X-API-Key: your-secret-key" http://localhost:3000/api/products
//! ```
//!
//! A missing or wrong key short-circuits the pipeline with `401` and the
//! standard error envelope; the router, and therefore the store, is never
//! reached.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{HeaderValue, WWW_AUTHENTICATE};
use axum::http::Request;
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::pipeline::{Flow, Stage};
use crate::error::{AppError, INVALID_API_KEY};
use crate::metrics;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Stage comparing the `X-API-Key` header against the configured secret.
#[derive(Clone)]
pub struct ApiKeyStage {
    expected_key: Arc<String>,
    /// Exact-match paths served without a key
    bypass_paths: Arc<Vec<String>>,
}

impl ApiKeyStage {
    pub fn new(api_key: String, bypass_paths: Vec<String>) -> Self {
        Self {
            expected_key: Arc::new(api_key),
            bypass_paths: Arc::new(bypass_paths),
        }
    }

    fn is_bypassed(&self, path: &str) -> bool {
        self.bypass_paths.iter().any(|p| p == path)
    }
}

impl Stage for ApiKeyStage {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn inspect(&self, req: &Request<Body>) -> Flow {
        let path = req.uri().path();
        if self.is_bypassed(path) {
            debug!(path, "Bypassing auth");
            return Flow::Continue;
        }

        match extract_api_key(req) {
            Some(key) if constant_time_eq(key, &self.expected_key) => Flow::Continue,
            provided => {
                metrics::record_auth_failure();
                warn!(
                    path,
                    method = %req.method(),
                    key_present = provided.is_some(),
                    "Rejected request with missing or invalid API key"
                );
                Flow::ShortCircuit(unauthorized_response())
            }
        }
    }
}

/// Read the API key header, if present and valid UTF-8.
fn extract_api_key<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
}

/// Perform constant-time comparison of two strings.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// 401 response rendered by the shared error formatter.
fn unauthorized_response() -> axum::response::Response {
    let mut response = AppError::Unauthorized(INVALID_API_KEY.to_string()).into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("API-Key"));
    response
}
