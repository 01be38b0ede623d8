//! Translation of a cart into a validated, gateway-ready checkout session.
//!
//! The catalog is re-consulted at build time, so price drift between
//! add-to-cart and checkout surfaces here instead of being silently carried
//! into the gateway request. Any failure aborts the whole build; there is no
//! partial result and no retry inside this module.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Cart, Product, ProductId, money};

/// Read-only product resolution, provided by the catalog.
///
/// Queried both when adding to the cart (snapshot at add time) and when
/// building a checkout session (current price at checkout time).
pub trait CatalogLookup {
    /// Resolve a product id to its canonical record, or `None` when the
    /// catalog no longer carries it.
    fn lookup(&self, id: &ProductId) -> Option<Product>;
}

/// Errors aborting a checkout build. The cart is never modified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout attempted on an empty cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The cart references a product the catalog no longer has.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// A gateway-ready line item with the price already converted to integer
/// minor units, eliminating floating-point drift in the gateway request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Catalog product id.
    pub product_id: ProductId,
    /// Current catalog title.
    pub title: String,
    /// Current catalog image URL, when the product has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Current catalog unit price in minor units.
    pub unit_amount_minor: i64,
    /// Units ordered, always >= 1.
    pub quantity: u32,
}

/// A validated, price-correct checkout request for the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSession {
    /// Line items in cart order.
    pub line_items: Vec<LineItem>,
    /// Sum of `unit_amount_minor * quantity` over all line items, via the
    /// same shared formula as the cart display subtotal.
    pub subtotal_minor: i64,
}

impl CheckoutSession {
    /// Build a checkout session from a cart snapshot.
    ///
    /// Each cart entry is resolved against the catalog in cart order, priced
    /// from the catalog's current record, and emitted as one line item.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] when the cart has no entries, and
    /// [`CheckoutError::UnknownProduct`] when any entry fails to resolve;
    /// either way no line items are returned.
    pub fn build(cart: &Cart, catalog: &impl CatalogLookup) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut line_items = Vec::with_capacity(cart.len());
        for item in cart.items() {
            let product = catalog
                .lookup(&item.product_id)
                .ok_or_else(|| CheckoutError::UnknownProduct(item.product_id.clone()))?;
            line_items.push(LineItem {
                product_id: product.id,
                title: product.title,
                image: product.image,
                unit_amount_minor: money::to_minor_units(product.price),
                quantity: item.quantity,
            });
        }

        let subtotal_minor = money::subtotal_minor(
            line_items
                .iter()
                .map(|line| (line.unit_amount_minor, line.quantity)),
        );

        Ok(Self {
            line_items,
            subtotal_minor,
        })
    }
}
