use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// Read-only product list, built once and shared for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(DomainError::DuplicateProductId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(DomainError::EmptyProductName(product.id));
            }
            if product.price < Decimal::ZERO {
                return Err(DomainError::NegativePrice {
                    id: product.id,
                    price: product.price.to_string(),
                });
            }
        }

        Ok(Self { products })
    }

    /// The demo inventory served by default.
    pub fn seeded() -> Self {
        Self { products: seed_products() }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub fn seed_products() -> Vec<Product> {
    vec![
        product(1, "Laptop", "High-performance laptop for developers", 99_999, 15),
        product(2, "Monitor", "27-inch 4K UHD display", 44_999, 32),
        product(3, "Keyboard", "Mechanical RGB keyboard", 12_999, 50),
        product(4, "Mouse", "Wireless ergonomic mouse", 7_999, 45),
        product(5, "USB-C Hub", "7-in-1 USB-C hub with multiple ports", 4_999, 28),
    ]
}

fn product(id: i32, name: &str, description: &str, price_cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
    }
}
