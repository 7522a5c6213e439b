use std::net::SocketAddr;

use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use shopfront_core::catalog::{seed_products, Catalog};
use shopfront_core::domain::product::{Product, ProductId};
use shopfront_view::{CatalogApi, CatalogView, HttpCatalogApi, ViewPhase, LOAD_FAILED_MESSAGE};
use tokio::net::TcpListener;

async fn list() -> Json<Vec<Product>> {
    Json(seed_products())
}

async fn get_one(Path(id): Path<i32>) -> Result<Json<Product>, StatusCode> {
    Catalog::seeded().find(ProductId(id)).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn spawn_service(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test service");
    });
    address
}

async fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

fn catalog_router() -> Router {
    Router::new().route("/api/products", get(list)).route("/api/products/{id}", get(get_one))
}

#[tokio::test]
async fn view_loads_catalog_over_http() {
    let address = spawn_service(catalog_router()).await;
    let view = CatalogView::new(HttpCatalogApi::new(format!("http://{address}")));

    let phase = view.activate().await;
    let state = view.state();

    assert_eq!(phase, ViewPhase::Loaded);
    assert!(state.error.is_none());
    assert_eq!(state.products, seed_products());
}

#[tokio::test]
async fn get_product_maps_404_to_none() {
    let address = spawn_service(catalog_router()).await;
    let api = HttpCatalogApi::new(format!("http://{address}/"));

    let keyboard = api.get_product(ProductId(3)).await.expect("lookup should succeed");
    assert_eq!(keyboard.map(|product| product.stock), Some(50));

    let missing = api.get_product(ProductId(999)).await.expect("404 is not an error");
    assert!(missing.is_none());
}

#[tokio::test]
async fn unreachable_service_fails_the_view() {
    let address = unused_address().await;
    let view = CatalogView::new(HttpCatalogApi::new(format!("http://{address}")));

    let phase = view.activate().await;
    let state = view.state();

    assert_eq!(phase, ViewPhase::Failed);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(state.products.is_empty());
}

#[tokio::test]
async fn non_success_status_fails_the_view() {
    let router = Router::new().route(
        "/api/products",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let address = spawn_service(router).await;
    let view = CatalogView::new(HttpCatalogApi::new(format!("http://{address}")));

    assert_eq!(view.activate().await, ViewPhase::Failed);
    assert_eq!(view.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn undecodable_body_fails_the_view() {
    let router = Router::new().route("/api/products", get(|| async { "not json" }));
    let address = spawn_service(router).await;
    let view = CatalogView::new(HttpCatalogApi::new(format!("http://{address}")));

    assert_eq!(view.activate().await, ViewPhase::Failed);
}
