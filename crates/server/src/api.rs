//! Read-only product endpoints.
//!
//! - `GET /api/products`: every product, in catalog order
//! - `GET /api/products/{id}`: one product, or an empty 404
//!
//! Both also answer with a trailing slash so they never reach the SPA fallback.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shopfront_core::{Catalog, Product, ProductId};
use tracing::debug;

#[derive(Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/{id}/", get(get_product))
        .with_state(CatalogState { catalog })
}

pub async fn list_products(State(state): State<CatalogState>) -> Json<Vec<Product>> {
    Json(state.catalog.all().to_vec())
}

pub async fn get_product(
    Path(id): Path<i32>,
    State(state): State<CatalogState>,
) -> Result<Json<Product>, StatusCode> {
    match state.catalog.find(ProductId(id)) {
        Some(product) => Ok(Json(product.clone())),
        None => {
            debug!(event_name = "api.products.not_found", product_id = id, "product lookup missed");
            Err(StatusCode::NOT_FOUND)
        }
    }
}
