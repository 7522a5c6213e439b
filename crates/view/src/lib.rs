//! Client-side catalog view.
//!
//! [`CatalogView`] issues one list request per load through a [`CatalogApi`]
//! and publishes `loading`/`error`/`products` snapshots on a watch channel.
//! [`render`] turns a snapshot into terminal text.

pub mod api;
pub mod render;
pub mod view;

pub use api::{ApiError, CatalogApi, HttpCatalogApi};
pub use render::render;
pub use view::{CatalogView, ViewPhase, ViewState, LOAD_FAILED_MESSAGE};
