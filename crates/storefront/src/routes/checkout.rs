//! Checkout route handler.
//!
//! Builds a validated checkout session from the session cart (re-consulting
//! the catalog for current prices) and creates a Stripe Checkout Session.
//! The cart is left untouched; clearing it after a successful payment is the
//! client's call once Stripe redirects to the success URL.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use verdant_core::checkout::{CheckoutError, CheckoutSession};

use crate::error::Result;
use crate::routes::cart::get_cart_id;
use crate::state::AppState;

/// Checkout response: where to send the buyer.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: String,
}

/// Create a checkout session for the current cart.
#[instrument(skip(state, session))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutResponse>> {
    // No cart ever assigned means nothing was ever added
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => state.cart_store(&cart_id).state(),
        None => return Err(CheckoutError::EmptyCart.into()),
    };

    let checkout = CheckoutSession::build(&cart, state.catalog())?;
    tracing::info!(
        line_items = checkout.line_items.len(),
        subtotal_minor = checkout.subtotal_minor,
        "Checkout session built"
    );

    let redirect = state.stripe().create_checkout_session(&checkout).await?;

    Ok(Json(CheckoutResponse {
        session_id: redirect.id,
        url: redirect.url,
    }))
}
