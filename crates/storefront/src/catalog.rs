//! Static product catalog.
//!
//! Products are loaded from a JSON file at startup into an order-preserving
//! in-memory list with an id index. The catalog is read-only at runtime; the
//! cart and checkout consult it through the [`CatalogLookup`] capability.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use verdant_core::checkout::CatalogLookup;
use verdant_core::types::{Product, ProductId};

/// Errors loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the file failed.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid JSON product list.
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    /// A product carries a negative price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// In-memory product catalog.
///
/// Cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON file containing an array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read, does not parse,
    /// or fails validation (duplicate ids, negative prices).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Self::from_products(products)
    }

    /// Build a catalog from an in-memory product list (used by tests and
    /// the CLI validator).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids or negative prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if product.price < rust_decimal::Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if index.insert(product.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self {
            inner: Arc::new(CatalogInner { products, index }),
        })
    }

    /// All products, in catalog file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.inner.products
    }

    /// Get a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.inner
            .index
            .get(id)
            .and_then(|&i| self.inner.products.get(i))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.products.is_empty()
    }
}

impl CatalogLookup for Catalog {
    fn lookup(&self, id: &ProductId) -> Option<Product> {
        // Value copy: cart snapshots must never reference catalog state
        self.get(id).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            image: None,
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog =
            Catalog::from_products(vec![product("B2", "7.00"), product("A1", "12.50")]).unwrap();

        assert_eq!(catalog.len(), 2);
        // File order preserved, not sorted
        assert_eq!(catalog.products()[0].id, ProductId::new("B2"));
        assert_eq!(
            catalog.lookup(&ProductId::new("A1")).unwrap().price,
            "12.50".parse().unwrap()
        );
        assert!(catalog.lookup(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_products(vec![product("A1", "1.00"), product("A1", "2.00")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Catalog::from_products(vec![product("A1", "-1.00")]);
        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn test_parse_catalog_json() {
        let json = r#"[
            {"id": "A1", "title": "Worm Castings", "price": "12.50"},
            {"id": "B2", "title": "Compost", "price": "7.00", "image": "https://cdn.example.com/b2.jpg"}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_products(products).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
