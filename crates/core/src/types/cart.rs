//! The cart data model.
//!
//! A [`Cart`] is an ordered sequence of [`CartItem`]s, unique by product id.
//! Item title and price are snapshots taken when the item was added; they do
//! not track later catalog changes. Insertion order is display-significant
//! and preserved through persistence round-trips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money;
use super::product::{Product, ProductId};

/// A single cart entry.
///
/// This is also the persisted record shape: carts serialize as a plain
/// ordered JSON array of these records, no envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product this entry refers to.
    pub product_id: ProductId,
    /// Title snapshot taken at add time.
    pub title: String,
    /// Unit price snapshot taken at add time, serialized as a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

/// Why a persisted cart snapshot was rejected as corrupt.
#[derive(Debug, Error)]
pub enum InvalidCartSnapshot {
    /// An entry carried a zero quantity.
    #[error("entry for {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// An entry carried a negative unit price.
    #[error("entry for {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// Two entries shared the same product id.
    #[error("duplicate entry for {0}")]
    DuplicateEntry(ProductId),
}

/// An ordered cart, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from already-deserialized items, enforcing the cart
    /// invariants (positive quantities, non-negative prices, unique ids).
    ///
    /// Persistence adapters call this when loading a stored snapshot; any
    /// violation means the stored data is corrupt and must be discarded.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCartSnapshot`] naming the offending entry.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, InvalidCartSnapshot> {
        for (i, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(InvalidCartSnapshot::ZeroQuantity(item.product_id.clone()));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(InvalidCartSnapshot::NegativePrice(item.product_id.clone()));
            }
            if items
                .iter()
                .take(i)
                .any(|other| other.product_id == item.product_id)
            {
                return Err(InvalidCartSnapshot::DuplicateEntry(item.product_id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The cart entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total unit count across all entries (cart badge number).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Display subtotal over the snapshot prices, in minor units.
    ///
    /// Goes through the same shared formula as the checkout builder, so the
    /// two agree whenever catalog prices have not drifted since add time.
    #[must_use]
    pub fn subtotal_minor(&self) -> i64 {
        money::subtotal_minor(
            self.items
                .iter()
                .map(|item| (money::to_minor_units(item.unit_price), item.quantity)),
        )
    }

    /// Merge a product into the cart: increment the existing entry's quantity
    /// or append a new snapshot entry at the end.
    ///
    /// The caller (the cart store) has already validated `quantity >= 1`.
    pub(crate) fn merge(&mut self, product: &Product, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                product_id: product.id.clone(),
                title: product.title.clone(),
                unit_price: product.price,
                quantity,
            });
        }
    }

    /// Drop the entry for `product_id`, if present.
    pub(crate) fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
    }

    /// Drop all entries.
    pub(crate) fn reset(&mut self) {
        self.items.clear();
    }
}
