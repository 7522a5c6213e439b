use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate product id {0}")]
    DuplicateProductId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyProductName(ProductId),
    #[error("product {id} has a negative price ({price})")]
    NegativePrice { id: ProductId, price: String },
}
