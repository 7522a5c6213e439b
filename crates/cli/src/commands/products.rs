use shopfront_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use shopfront_core::ProductId;
use shopfront_view::render::render_product;
use shopfront_view::{render, CatalogApi, CatalogView, HttpCatalogApi, ViewPhase, LOAD_FAILED_MESSAGE};
use tracing::error;

use crate::commands::CommandResult;

const SERVICE_UNREACHABLE_EXIT: u8 = 3;
const NOT_FOUND_EXIT: u8 = 4;

pub fn run(id: Option<i32>, api_base_url: Option<String>) -> CommandResult {
    let options = LoadOptions {
        overrides: ConfigOverrides { api_base_url, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "products",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            )
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "products",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            )
        }
    };

    let api = HttpCatalogApi::new(config.client.api_base_url);
    runtime.block_on(async {
        match id {
            None => list(api).await,
            Some(id) => show(&api, ProductId(id)).await,
        }
    })
}

/// Activates a catalog view and prints whatever state it settles in.
pub async fn list<A>(api: A) -> CommandResult
where
    A: CatalogApi,
{
    let view = CatalogView::new(api);
    let phase = view.activate().await;
    let output = render(&view.state());

    if phase == ViewPhase::Failed {
        return CommandResult { exit_code: SERVICE_UNREACHABLE_EXIT, output };
    }
    CommandResult::text(output)
}

pub async fn show<A>(api: &A, id: ProductId) -> CommandResult
where
    A: CatalogApi,
{
    match api.get_product(id).await {
        Ok(Some(product)) => CommandResult::text(render_product(&product)),
        Ok(None) => CommandResult::failure(
            "products",
            "not_found",
            format!("product {id} not found"),
            NOT_FOUND_EXIT,
        ),
        Err(err) => {
            error!(event_name = "cli.products.lookup_failed", product_id = id.0, error = %err, "error loading product");
            CommandResult::failure(
                "products",
                "service_unreachable",
                LOAD_FAILED_MESSAGE,
                SERVICE_UNREACHABLE_EXIT,
            )
        }
    }
}
