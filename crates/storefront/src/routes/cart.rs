//! Cart route handlers.
//!
//! The buyer's cart id lives in the cookie session; the cart itself lives in
//! the session-independent persisted snapshot, so carts survive session loss
//! and process restarts.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use verdant_core::types::{Cart, ProductId, money};

use crate::error::{AppError, Result};
use crate::middleware::session_keys;
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal_minor: i64,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| {
                let unit_minor = money::to_minor_units(item.unit_price);
                CartItemView {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                    quantity: item.quantity,
                    unit_price: money::format_minor(unit_minor),
                    line_total: money::format_minor(money::line_total_minor(
                        unit_minor,
                        item.quantity,
                    )),
                }
            })
            .collect();

        Self {
            items,
            subtotal_minor: cart.subtotal_minor(),
            subtotal: money::format_minor(cart.subtotal_minor()),
            item_count: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart id from the session, if one was ever assigned.
pub async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the session's cart id, assigning a fresh one on first use.
pub async fn ensure_cart_id(session: &Session) -> Result<String> {
    if let Some(id) = get_cart_id(session).await {
        return Ok(id);
    }
    let id = Uuid::new_v4().to_string();
    session
        .insert(session_keys::CART_ID, &id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart id in session: {e}")))?;
    Ok(id)
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Cart count response.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Display the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CartView> {
    let view = match get_cart_id(&session).await {
        Some(cart_id) => CartView::from(&state.cart_store(&cart_id).state()),
        None => CartView::empty(),
    };
    Json(view)
}

/// Add an item to the cart.
///
/// Snapshots the product's current title and price; a repeated add for the
/// same product increments the existing entry instead of duplicating it.
#[instrument(skip(state, session), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let cart_id = ensure_cart_id(&session).await?;
    let cart = state
        .cart_store(&cart_id)
        .add_item(&product, request.quantity.unwrap_or(1))?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove an item from the cart. A no-op when the item is absent.
#[instrument(skip(state, session), fields(product_id = %request.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Ok(Json(CartView::empty()));
    };
    let cart = state.cart_store(&cart_id).remove_item(&request.product_id);
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Ok(Json(CartView::empty()));
    };
    let cart = state.cart_store(&cart_id).clear();
    Ok(Json(CartView::from(&cart)))
}

/// Cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Json<CartCountResponse> {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state.cart_store(&cart_id).state().total_quantity(),
        None => 0,
    };
    Json(CartCountResponse { count })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verdant_core::cart::{CartPersistence, CartStore};
    use verdant_core::types::Product;

    use super::*;

    struct NullStore;

    impl CartPersistence for NullStore {
        fn load(&self) -> Option<Cart> {
            None
        }
        fn save(&self, _cart: &Cart) {}
    }

    #[test]
    fn test_cart_view_formatting() {
        let store = CartStore::new(NullStore);
        let product = Product {
            id: ProductId::new("A1"),
            title: "Worm Castings".to_string(),
            price: "12.50".parse().unwrap(),
            image: None,
        };
        let cart = store.add_item(&product, 2).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].unit_price, "$12.50");
        assert_eq!(view.items[0].line_total, "$25.00");
        assert_eq!(view.subtotal_minor, 2500);
        assert_eq!(view.subtotal, "$25.00");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }
}
