//! Integration tests for Verdant.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations and persistence round-trips across the
//!   file-backed and in-memory adapters
//! - `checkout_session` - End-to-end checkout builds against a fixture
//!   catalog, including price drift and catalog removals
//!
//! The helpers here build a fixture catalog shared by both suites.

use std::path::PathBuf;

use verdant_core::types::{Product, ProductId};
use verdant_storefront::catalog::Catalog;

/// Build the fixture catalog used across the integration suites.
///
/// # Panics
///
/// Panics when the fixture data is internally inconsistent, which is a bug
/// in the test fixture itself.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_catalog() -> Catalog {
    let products = vec![
        product("A1", "Organic Worm Castings", "12.50"),
        product("B2", "Premium Compost Blend", "7.00"),
        product("C3", "Liquid Kelp Fertilizer", "19.95"),
    ];
    Catalog::from_products(products).unwrap()
}

/// Build a single fixture product.
///
/// # Panics
///
/// Panics when `price` is not a valid decimal literal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, title: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: price.parse().unwrap(),
        image: None,
    }
}

/// A fresh scratch directory for file-backed persistence tests.
///
/// # Panics
///
/// Panics when the directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("verdant-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
