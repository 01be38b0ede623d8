//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /api/products           - Product listing
//! GET  /api/products/{id}      - Product detail
//!
//! # Cart
//! GET  /api/cart               - Cart view
//! POST /api/cart/add           - Add item (merges on repeat adds)
//! POST /api/cart/remove        - Remove item (no-op if absent)
//! POST /api/cart/clear         - Empty the cart
//! GET  /api/cart/count         - Cart count badge
//!
//! # Checkout
//! POST /api/checkout           - Create a Stripe checkout session
//!
//! # Forms
//! POST /api/contact            - Contact form submission
//! POST /api/chat               - Chat proxy
//! ```

pub mod cart;
pub mod chat;
pub mod checkout;
pub mod contact;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(checkout::create))
        .route("/api/contact", post(contact::submit))
        .route("/api/chat", post(chat::reply))
}
