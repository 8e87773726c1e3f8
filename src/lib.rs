//! # Product API
//!
//! An Axum service exposing CRUD operations over an in-memory catalogue of
//! product records:
//!
//! - **Store**: ordered in-memory records owned by [`AppState`]
//! - **Security**: static API key checked in constant time
//! - **Validation**: presence/type checks on every create and update
//! - **Errors**: one formatter producing `{"error", "message"}` envelopes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Request ID → Stages (Logging → Auth) → Trace → CORS        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Router → Handlers (validation in extractors)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ProductStore (RwLock inside AppState)                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_api::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let addr = config.server_addr();
//!     let app = build_router(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
pub use store::ProductStore;
