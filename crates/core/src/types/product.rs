//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque catalog identifier for a product (SKU-like, e.g. `"B0C3H2P1QZ"`).
///
/// Newtype over `String` so product ids cannot be mixed up with other
/// string-typed values like cart ids or session keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A canonical catalog product record.
///
/// Owned by the catalog; the cart only ever takes value copies of the
/// title and price, so later catalog edits never retroactively alter
/// items already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the currency's standard unit (dollars, not cents).
    /// Serialized as a decimal string to preserve precision.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Optional product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
