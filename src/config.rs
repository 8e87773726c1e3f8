//! Application configuration loaded from environment variables.
//!
//! All configuration is loaded from environment variables with development
//! defaults. A `.env` file in the working directory is read first if present.
//!
//! # Security Configuration
//!
//! - `API_KEY`: Required. Every request outside `AUTH_BYPASS_PATHS` must send it
//!   in the `X-API-Key` header
//! - `AUTH_BYPASS_PATHS`: Comma-separated exact paths served without a key (default: `/`)
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins (default: `*` for dev)
//!
//! # Limits
//!
//! - `MAX_REQUEST_BODY_SIZE`: Maximum JSON body size in bytes (default: 1MB)
//! - `MAX_PAGE_LIMIT`: Largest accepted `limit` on the collection endpoint (default: 100)

use std::env;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Catalogue Configuration
    // =========================================================================
    /// Largest `limit` a client may request on `GET /api/products` (default: 100)
    pub max_page_limit: u64,

    /// Seed the store with the sample "Laptop" record on startup (default: true)
    pub seed_sample_data: bool,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Shared secret every authenticated request must present
    pub api_key: String,

    /// Paths that skip authentication, matched exactly (default: ["/"])
    pub auth_bypass_paths: Vec<String>,

    /// Allowed CORS origins; "*" allows any origin
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,

    /// Port for Prometheus metrics endpoint (default: 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `API_KEY` is missing or any value is
    /// malformed (e.g., non-numeric `PORT`).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,

            // Catalogue
            max_page_limit: Self::parse_env("MAX_PAGE_LIMIT", 100)?,
            seed_sample_data: Self::parse_env("SEED_SAMPLE_DATA", true)?,

            // Security
            api_key: env::var("API_KEY").unwrap_or_default(),
            auth_bypass_paths: Self::parse_list("AUTH_BYPASS_PATHS", "/")
                .into_iter()
                .filter(|p| p.starts_with('/'))
                .collect(),
            cors_allowed_origins: Self::parse_list("CORS_ALLOWED_ORIGINS", "*"),

            // Observability
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            metrics_port: Self::parse_env("METRICS_PORT", 0)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if validation fails.
    fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "API_KEY must be set to a non-empty value".to_string(),
            ));
        }

        if self.max_request_body_size == 0 {
            return Err(AppError::Config(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.max_page_limit == 0 {
            return Err(AppError::Config(
                "MAX_PAGE_LIMIT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address, or `None` when metrics are disabled.
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        self.metrics_enabled()
            .then(|| std::net::SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse a comma-separated list, dropping blank entries.
    fn parse_list(name: &str, default: &str) -> Vec<String> {
        env::var(name)
            .unwrap_or_else(|_| default.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// `api_key` is empty and fails validation; production deployments should
/// use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_request_body_size: 1024 * 1024, // 1MB
            max_page_limit: 100,
            seed_sample_data: true,
            api_key: String::new(),
            auth_bypass_paths: vec!["/".to_string()],
            cors_allowed_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
            metrics_port: 0,
        }
    }
}
