use std::sync::Arc;

use axum::Router;
use shopfront_core::catalog::{seed_products, Catalog};
use shopfront_core::config::{AppConfig, ConfigError};
use shopfront_core::DomainError;
use thiserror::Error;
use tracing::{info, warn};

use crate::app::{self, InvalidOrigin};

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog seed data is invalid: {0}")]
    Catalog(#[from] DomainError),
    #[error(transparent)]
    Cors(#[from] InvalidOrigin),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        environment = ?config.server.environment,
        "starting application bootstrap"
    );

    let catalog = Arc::new(Catalog::new(seed_products())?);
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        product_count = catalog.len(),
        "in-memory catalog loaded"
    );

    let index = config.server.static_dir.join("index.html");
    if !index.is_file() {
        warn!(
            event_name = "system.bootstrap.static_bundle_missing",
            correlation_id = "bootstrap",
            static_dir = %config.server.static_dir.display(),
            "static bundle has no index.html; unmatched paths will return 404"
        );
    }

    let router = app::router(&config, catalog.clone())?;
    info!(
        event_name = "system.bootstrap.router_ready",
        correlation_id = "bootstrap",
        allowed_origins = ?config.cors.allowed_origins(),
        "http router assembled"
    );

    Ok(Application { config, catalog, router })
}
