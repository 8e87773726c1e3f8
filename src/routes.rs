//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Stage pipeline   │ ← Logging, then Authentication (401 short-circuit)
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response spans
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Body limit     │ ← 413 for oversized JSON bodies
//! └────────┬─────────┘
//!          ▼
//!   Router → Handler (validation in extractors) → AppError formatter
//! ```

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{ApiKeyStage, LoggingStage, PipelineLayer, RequestIdLayer, Stage};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let pipeline = build_pipeline(config.api_key.clone(), config.auth_bypass_paths.clone());
    info!(
        stages = ?pipeline.stage_names(),
        bypass_paths = ?config.auth_bypass_paths,
        "Request pipeline configured"
    );

    Router::new()
        .route("/", get(handlers::welcome))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/stats/category-count",
            get(handlers::category_count),
        )
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        // Applied bottom to top: the last layer added runs first.
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(pipeline)
        .layer(RequestIdLayer::new())
        .with_state(state)
}

/// The fixed stage order every request goes through.
fn build_pipeline(api_key: String, bypass_paths: Vec<String>) -> PipelineLayer {
    let stages: Vec<Arc<dyn Stage>> = vec![
        Arc::new(LoggingStage::new()),
        Arc::new(ApiKeyStage::new(api_key, bypass_paths)),
    ];
    PipelineLayer::new(stages)
}

/// Build CORS layer from configuration.
///
/// `*` allows any origin; otherwise only the listed origins are allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        base.allow_origin(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        base.allow_origin(origins)
    }
}
