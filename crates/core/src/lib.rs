pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use catalog::Catalog;
pub use domain::product::{Product, ProductId};
pub use errors::DomainError;
