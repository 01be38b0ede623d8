//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use verdant_core::cart::CartError;
use verdant_core::checkout::CheckoutError;

use crate::catalog::CatalogError;
use crate::services::{ChatError, ContactError, StripeError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart mutation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout build aborted.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog failed to load or resolve.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Payment gateway failed; surfaced unmodified, never retried here.
    #[error("Gateway error: {0}")]
    Gateway(#[from] StripeError),

    /// Chat upstream failed.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Contact sink failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        if matches!(
            self,
            Self::Gateway(_) | Self::Chat(_) | Self::Contact(_) | Self::Catalog(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Cart(CartError::InvalidQuantity) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Checkout(CheckoutError::EmptyCart) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Checkout(CheckoutError::UnknownProduct(_)) => StatusCode::CONFLICT,
            Self::Gateway(_) | Self::Chat(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::Contact(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Gateway(_) => "Failed to create checkout session".to_string(),
            Self::Chat(_) => "Error communicating with AI".to_string(),
            Self::Contact(_) => "Failed to save message".to_string(),
            Self::Catalog(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use verdant_core::types::ProductId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product A1".to_string());
        assert_eq!(err.to_string(), "Not found: product A1");

        let err = AppError::Cart(CartError::InvalidQuantity);
        assert_eq!(err.to_string(), "Cart error: quantity must be at least 1");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Cart(CartError::InvalidQuantity)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::UnknownProduct(
                ProductId::new("A1")
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Gateway(StripeError::Api {
                status: 500,
                message: "boom".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
