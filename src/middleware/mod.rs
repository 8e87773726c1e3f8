//! HTTP middleware: the request stage pipeline and request ids.
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → [ Logging → Auth ] → Trace → CORS → Router
//!              ↓                       ↓
//!      X-Request-Id header       401 short-circuit
//! ```
//!
//! Logging and authentication are [`Stage`]s run in order by
//! [`PipelineLayer`]; the request id layer wraps the whole pipeline.

pub mod auth;
pub mod logging;
pub mod pipeline;
pub mod request_id;

pub use auth::{API_KEY_HEADER, ApiKeyStage};
pub use logging::LoggingStage;
pub use pipeline::{Flow, PipelineLayer, Stage};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdExt, RequestIdLayer};
