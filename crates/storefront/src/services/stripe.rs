//! Stripe Checkout Session client.
//!
//! Thin form-encoded client for `POST /v1/checkout/sessions`. Gateway
//! failures are surfaced unmodified as [`StripeError`]; retry, if any,
//! belongs to the caller.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use verdant_core::checkout::CheckoutSession;

use crate::config::StripeConfig;

/// Errors from the Stripe API. Opaque to the core: the cart is never
/// modified and nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe rejected the request.
    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not parse.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A created checkout session: the id and the URL to redirect the buyer to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRedirect {
    /// Stripe session id.
    pub id: String,
    /// Hosted checkout page URL.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Client for Stripe Checkout.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StripeClient {
    inner: Arc<StripeClientInner>,
}

struct StripeClientInner {
    client: reqwest::Client,
    endpoint: String,
    secret_key: String,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    /// Create a new Stripe client.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            inner: Arc::new(StripeClientInner {
                client: reqwest::Client::new(),
                endpoint: format!("{}/v1/checkout/sessions", config.api_base),
                secret_key: config.secret_key.expose_secret().to_string(),
                success_url: config.success_url.clone(),
                cancel_url: config.cancel_url.clone(),
            }),
        }
    }

    /// Create a Stripe Checkout Session for an already-built checkout.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError`] on transport failure, a non-success response,
    /// or an unparseable body.
    #[instrument(skip(self, session), fields(line_items = session.line_items.len(), subtotal_minor = session.subtotal_minor))]
    pub async fn create_checkout_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<CheckoutRedirect, StripeError> {
        let params = build_session_params(
            session,
            &self.inner.success_url,
            &self.inner.cancel_url,
        );

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.secret_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let redirect: CheckoutRedirect = serde_json::from_str(&body)?;
        tracing::debug!(session_id = %redirect.id, "Created Stripe checkout session");
        Ok(redirect)
    }
}

/// Build the form parameters for a checkout session request.
///
/// Line items map to Stripe's indexed `price_data` form fields with
/// `unit_amount` already in integer minor units.
#[must_use]
pub fn build_session_params(
    session: &CheckoutSession,
    success_url: &str,
    cancel_url: &str,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        (
            "payment_method_types[0]".to_string(),
            "card".to_string(),
        ),
        ("success_url".to_string(), success_url.to_string()),
        ("cancel_url".to_string(), cancel_url.to_string()),
    ];

    for (i, line) in session.line_items.iter().enumerate() {
        params.push((
            format!("line_items[{i}][price_data][currency]"),
            "usd".to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            line.title.clone(),
        ));
        if let Some(image) = &line.image {
            params.push((
                format!("line_items[{i}][price_data][product_data][images][0]"),
                image.clone(),
            ));
        }
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            line.unit_amount_minor.to_string(),
        ));
        params.push((
            format!("line_items[{i}][quantity]"),
            line.quantity.to_string(),
        ));
    }

    params
}
