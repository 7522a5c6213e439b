use shopfront_core::domain::product::Product;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::api::CatalogApi;

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load products. Make sure the backend is running on http://localhost:7239";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Loaded,
    Failed,
}

/// Snapshot published to subscribers after every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub products: Vec<Product>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { loading: true, error: None, products: Vec::new() }
    }
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.error.is_some() {
            ViewPhase::Failed
        } else {
            ViewPhase::Loaded
        }
    }
}

pub struct CatalogView<A> {
    api: A,
    state: watch::Sender<ViewState>,
}

impl<A> CatalogView<A>
where
    A: CatalogApi,
{
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub async fn activate(&self) -> ViewPhase {
        self.load().await
    }

    /// Re-enters `Loading` and applies the outcome of one list request.
    ///
    /// Overlapping calls are not superseded: each applies its own result when
    /// it completes and returns the phase of that result.
    pub async fn load(&self) -> ViewPhase {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.list_products().await {
            Ok(products) => {
                debug!(
                    event_name = "view.catalog.loaded",
                    product_count = products.len(),
                    "product list loaded"
                );
                self.state.send_modify(|state| {
                    state.products = products;
                    state.error = None;
                    state.loading = false;
                });
                ViewPhase::Loaded
            }
            Err(err) => {
                error!(event_name = "view.catalog.load_failed", error = %err, "error loading products");
                self.state.send_modify(|state| {
                    state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                    state.loading = false;
                });
                ViewPhase::Failed
            }
        }
    }
}
