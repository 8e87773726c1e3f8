//! Product CRUD and aggregation endpoints.
//!
//! # Endpoints
//!
//! - `GET    /api/products`                       - List with filters and pagination
//! - `GET    /api/products/{id}`                  - Fetch one product
//! - `POST   /api/products`                       - Create a product (201)
//! - `PUT    /api/products/{id}`                  - Merge a payload into a product
//! - `DELETE /api/products/{id}`                  - Remove a product (204)
//! - `GET    /api/products/stats/category-count`  - Products per category
//!
//! Handlers return `AppResult` and leave all error formatting to `AppError`.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::{debug, info, instrument};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedProduct;
use crate::metrics;
use crate::models::{CategoryCounts, ListProductsQuery, Product, ProductFilter};
use crate::state::AppState;
use crate::validation::parse_pagination;

/// List products.
///
/// # Query Parameters
///
/// - `category`: case-insensitive exact match
/// - `search`: case-insensitive substring of the name
/// - `page`: 1-indexed page (default 1)
/// - `limit`: page size (default 10, at most `MAX_PAGE_LIMIT`)
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let pagination = parse_pagination(&query, state.config.max_page_limit)?;
    let filter = ProductFilter::from_query(&query);

    let products = state.store.read().await.query(&filter, pagination);
    debug!(
        returned = products.len(),
        page = pagination.page(),
        limit = pagination.limit(),
        "Listed products"
    );

    Ok(Json(products))
}

/// Get a product by id.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    state
        .store
        .read()
        .await
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(AppError::product_not_found)
}

/// Create a product from a validated payload.
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut store = state.store.write().await;
    let product = store.create(input);

    metrics::record_product_created();
    metrics::set_products_stored(store.len());
    info!(id = %product.id, category = %product.category, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge a validated payload into an existing product.
///
/// Validation happens in the extractor, so an invalid body is rejected with
/// 400 even when the id does not exist.
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedProduct(input): ValidatedProduct,
) -> AppResult<Json<Product>> {
    let product = state
        .store
        .write()
        .await
        .replace(&id, input)
        .ok_or_else(AppError::product_not_found)?;

    metrics::record_product_updated();
    info!(id = %product.id, "Product updated");

    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    let removed = store.remove(&id).ok_or_else(AppError::product_not_found)?;

    metrics::record_product_deleted();
    metrics::set_products_stored(store.len());
    info!(id = %removed.id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Count products per category.
///
/// # Response Body
///
/// ```json
/// { "books": 1, "electronics": 2 }
/// ```
#[instrument(skip(state))]
pub async fn category_count(State(state): State<AppState>) -> Json<CategoryCounts> {
    Json(state.store.read().await.category_counts())
}
