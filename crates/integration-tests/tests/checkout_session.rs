//! Checkout session integration tests.
//!
//! Builds checkout sessions from carts assembled through the real cart
//! store, against the fixture catalog, and checks the gateway parameter
//! encoding end to end.

#![allow(clippy::unwrap_used)]

use verdant_core::cart::CartStore;
use verdant_core::checkout::{CatalogLookup, CheckoutError, CheckoutSession};
use verdant_core::types::{Cart, ProductId};
use verdant_integration_tests::{fixture_catalog, product};
use verdant_storefront::persistence::MemoryStore;
use verdant_storefront::services::stripe::build_session_params;

#[test]
fn test_cart_to_gateway_params() {
    let catalog = fixture_catalog();
    let store = CartStore::new(MemoryStore::new());
    store
        .add_item(&catalog.lookup(&ProductId::new("A1")).unwrap(), 2)
        .unwrap();
    store
        .add_item(&catalog.lookup(&ProductId::new("B2")).unwrap(), 1)
        .unwrap();

    let session = CheckoutSession::build(&store.state(), &catalog).unwrap();
    assert_eq!(session.subtotal_minor, 3200);

    let params = build_session_params(
        &session,
        "https://shop.test/success",
        "https://shop.test/cancel",
    );
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("1250"));
    assert_eq!(get("line_items[0][quantity]"), Some("2"));
    assert_eq!(get("line_items[1][price_data][unit_amount]"), Some("700"));
    assert_eq!(
        get("line_items[0][price_data][product_data][name]"),
        Some("Organic Worm Castings")
    );
}

#[test]
fn test_checkout_subtotal_matches_cart_display_subtotal() {
    let catalog = fixture_catalog();
    let store = CartStore::new(MemoryStore::new());
    for (id, quantity) in [("A1", 3), ("B2", 2), ("C3", 1)] {
        store
            .add_item(&catalog.lookup(&ProductId::new(id)).unwrap(), quantity)
            .unwrap();
    }

    let cart = store.state();
    let session = CheckoutSession::build(&cart, &catalog).unwrap();

    // One shared subtotal formula: cart view and gateway request agree
    assert_eq!(session.subtotal_minor, cart.subtotal_minor());
}

#[test]
fn test_empty_cart_is_rejected() {
    let catalog = fixture_catalog();
    assert_eq!(
        CheckoutSession::build(&Cart::new(), &catalog),
        Err(CheckoutError::EmptyCart)
    );
}

#[test]
fn test_discontinued_product_aborts_checkout_and_keeps_cart() {
    let catalog = fixture_catalog();
    let store = CartStore::new(MemoryStore::new());
    store
        .add_item(&catalog.lookup(&ProductId::new("A1")).unwrap(), 1)
        .unwrap();
    store
        .add_item(&product("GONE", "Discontinued Item", "5.00"), 1)
        .unwrap();

    let cart = store.state();
    assert_eq!(
        CheckoutSession::build(&cart, &catalog),
        Err(CheckoutError::UnknownProduct(ProductId::new("GONE")))
    );
    // The failed build never mutates the cart
    assert_eq!(store.state(), cart);
}

#[test]
fn test_checkout_reprices_from_current_catalog() {
    let catalog = fixture_catalog();
    let store = CartStore::new(MemoryStore::new());
    // Added when the price was lower than today's catalog price
    store
        .add_item(&product("A1", "Organic Worm Castings", "10.00"), 2)
        .unwrap();

    let cart = store.state();
    let session = CheckoutSession::build(&cart, &catalog).unwrap();

    // Gateway request carries the current 12.50, not the stale 10.00
    assert_eq!(session.line_items[0].unit_amount_minor, 1250);
    assert_eq!(session.subtotal_minor, 2500);
    assert_eq!(cart.subtotal_minor(), 2000);
}
