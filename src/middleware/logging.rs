//! Request logging stage.
//!
//! Writes one `info` line per inbound request with its method, path and
//! query, and request id. Always continues.

use axum::body::Body;
use axum::http::Request;
use tracing::info;

use super::pipeline::{Flow, Stage};
use super::request_id::RequestIdExt;

/// Stage logging every inbound request.
#[derive(Clone, Copy, Default)]
pub struct LoggingStage;

impl LoggingStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for LoggingStage {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn inspect(&self, req: &Request<Body>) -> Flow {
        let target = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path(), |pq| pq.as_str());

        info!(
            method = %req.method(),
            path = %target,
            request_id = req.request_id().unwrap_or("-"),
            "Incoming request"
        );

        Flow::Continue
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_never_short_circuits() {
        let req = Request::builder()
            .method("DELETE")
            .uri("/api/products/1?x=y")
            .body(Body::empty())
            .unwrap();

        assert!(matches!(LoggingStage::new().inspect(&req), Flow::Continue));
    }
}
