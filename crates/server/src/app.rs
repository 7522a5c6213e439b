use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use shopfront_core::config::{AppConfig, CorsConfig};
use shopfront_core::Catalog;
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

#[derive(Debug, Error)]
#[error("cors origin `{origin}` is not a valid header value")]
pub struct InvalidOrigin {
    pub origin: String,
}

/// API, health and (in development) OpenAPI routes, with every other path
/// answered from the static bundle or its `index.html`.
pub fn router(config: &AppConfig, catalog: Arc<Catalog>) -> Result<Router, InvalidOrigin> {
    let static_dir = &config.server.static_dir;
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let mut router =
        Router::new().merge(crate::api::router(catalog.clone())).merge(crate::health::router(catalog));
    if config.server.environment.is_development() {
        router = router.merge(crate::openapi::router());
    }

    Ok(router.fallback_service(spa).layer(cors_layer(&config.cors)?))
}

pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer, InvalidOrigin> {
    let origins = cors
        .allowed_origins()
        .into_iter()
        .map(|origin| {
            let trimmed = origin.trim_end_matches('/');
            HeaderValue::from_str(trimmed).map_err(|_| InvalidOrigin { origin: origin.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any))
}
