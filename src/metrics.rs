//! Prometheus metrics for application observability.
//!
//! Metrics are recorded through the `metrics` facade everywhere; the
//! Prometheus exporter is only installed when `METRICS_PORT` is non-zero.
//! Without an installed recorder every call here is a no-op.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `product_api_products_created_total`
//! - `product_api_products_updated_total`
//! - `product_api_products_deleted_total`
//! - `product_api_auth_failures_total`
//! - `product_api_errors_total` (label: kind)
//!
//! ## Gauges
//! - `product_api_products_stored` - Records currently held in the store

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const PRODUCTS_CREATED_TOTAL: &str = "product_api_products_created_total";
    pub const PRODUCTS_UPDATED_TOTAL: &str = "product_api_products_updated_total";
    pub const PRODUCTS_DELETED_TOTAL: &str = "product_api_products_deleted_total";
    pub const AUTH_FAILURES_TOTAL: &str = "product_api_auth_failures_total";
    pub const ERRORS_TOTAL: &str = "product_api_errors_total";
    pub const PRODUCTS_STORED: &str = "product_api_products_stored";
}

/// Install the Prometheus exporter and describe all metrics.
///
/// # Errors
///
/// Returns a message if the exporter cannot be installed (e.g., port in use
/// or a recorder is already set).
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(names::PRODUCTS_CREATED_TOTAL, "Total products created");
    describe_counter!(names::PRODUCTS_UPDATED_TOTAL, "Total products updated");
    describe_counter!(names::PRODUCTS_DELETED_TOTAL, "Total products deleted");
    describe_counter!(
        names::AUTH_FAILURES_TOTAL,
        "Requests rejected for a missing or invalid API key"
    );
    describe_counter!(names::ERRORS_TOTAL, "Error responses by error kind");
    describe_gauge!(
        names::PRODUCTS_STORED,
        "Number of products currently in the store"
    );

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

pub fn record_product_created() {
    counter!(names::PRODUCTS_CREATED_TOTAL).increment(1);
}

pub fn record_product_updated() {
    counter!(names::PRODUCTS_UPDATED_TOTAL).increment(1);
}

pub fn record_product_deleted() {
    counter!(names::PRODUCTS_DELETED_TOTAL).increment(1);
}

pub fn record_auth_failure() {
    counter!(names::AUTH_FAILURES_TOTAL).increment(1);
}

/// Record an error response by its kind name (e.g. `NotFoundError`).
pub fn record_error(kind: &'static str) {
    counter!(names::ERRORS_TOTAL, "kind" => kind).increment(1);
}

pub fn set_products_stored(count: usize) {
    gauge!(names::PRODUCTS_STORED).set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    // No recorder is installed in unit tests; these only check nothing panics.

    #[test]
    fn test_record_counters() {
        record_product_created();
        record_product_updated();
        record_product_deleted();
        record_auth_failure();
        record_error("NotFoundError");
    }

    #[test]
    fn test_set_products_stored() {
        set_products_stored(0);
        set_products_stored(42);
    }
}
