//! Shared application state for Axum handlers.
//!
//! `AppState` is the composition root's handle on everything a handler
//! needs: the product store and the runtime configuration. It is cloned per
//! request; both members are behind `Arc`.
//!
//! # Store Access
//!
//! The store sits behind one `tokio::sync::RwLock`. Reads (list, get,
//! category count) share the lock; create/update/delete hold the write lock
//! for the whole mutation so mutations never interleave.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::metrics;
use crate::store::ProductStore;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The product store
    pub store: Arc<RwLock<ProductStore>>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state with a store seeded according to `config.seed_sample_data`.
    pub fn new(config: Config) -> Self {
        let store = if config.seed_sample_data {
            ProductStore::with_sample_data()
        } else {
            ProductStore::new()
        };
        info!(products = store.len(), "Product store initialized");
        Self::with_store(store, config)
    }

    /// Create state around an existing store.
    pub fn with_store(store: ProductStore, config: Config) -> Self {
        metrics::set_products_stored(store.len());
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_by_default() {
        let state = AppState::new(Config::default());
        assert_eq!(state.store.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_seeding_disabled() {
        let state = AppState::new(Config {
            seed_sample_data: false,
            ..Config::default()
        });
        assert!(state.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let state = AppState::new(Config::default());
        let clone = state.clone();
        clone.store.write().await.remove("1");
        assert!(state.store.read().await.is_empty());
    }
}
