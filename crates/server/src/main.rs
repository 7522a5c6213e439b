mod api;
mod app;
mod bootstrap;
mod health;
mod openapi;
mod serve;

use std::time::Duration;

use anyhow::Result;
use shopfront_core::config::{AppConfig, LoadOptions};
use tokio::net::TcpListener;
use tracing::info;

fn init_logging(config: &AppConfig) {
    use shopfront_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Logging depends on the loaded config, so nothing may log before this.
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;
    let address = app.config.server.listen_address();
    let listener = TcpListener::bind(&address).await?;

    info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        product_count = app.catalog.len(),
        static_dir = %app.config.server.static_dir.display(),
        "shopfront-server listening"
    );

    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    serve::serve_until(listener, app.router, serve::wait_for_shutdown(), grace).await?;

    info!(event_name = "system.server.stopped", correlation_id = "shutdown", "shopfront-server stopped");
    Ok(())
}
