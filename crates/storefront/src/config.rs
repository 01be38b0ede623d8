//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `STRIPE_SECRET_KEY` - Stripe API secret key
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_PATH` - Product catalog JSON file (default: crates/storefront/data/products.json)
//! - `CART_DATA_DIR` - Directory for persisted cart snapshots (default: data/carts)
//! - `CONTACT_LOG_PATH` - Contact submission log (default: data/contact.jsonl)
//! - `STRIPE_API_BASE` - Stripe API base URL (default: https://api.stripe.com)
//! - `STRIPE_SUCCESS_URL` / `STRIPE_CANCEL_URL` - Checkout redirect targets
//!   (default: `{base_url}/success` and `{base_url}/cancel`)
//! - `OPENAI_API_KEY` - Chat proxy API key (chat falls back to a canned reply without it)
//! - `OPENAI_MODEL` - Chat model (default: gpt-3.5-turbo)
//! - `OPENAI_API_BASE` - Chat API base URL (default: https://api.openai.com)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Product catalog JSON file
    pub catalog_path: PathBuf,
    /// Directory holding per-cart persisted snapshots
    pub cart_data_dir: PathBuf,
    /// Append-only contact submission log
    pub contact_log_path: PathBuf,
    /// Stripe gateway configuration
    pub stripe: StripeConfig,
    /// Chat proxy configuration
    pub chat: ChatConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Stripe Checkout configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe API secret key (server-side only)
    pub secret_key: SecretString,
    /// Stripe API base URL (overridable for tests)
    pub api_base: String,
    /// Where Stripe redirects after a successful payment
    pub success_url: String,
    /// Where Stripe redirects after a cancelled payment
    pub cancel_url: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .finish()
    }
}

/// Chat proxy configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChatConfig {
    /// API key; when absent the chat endpoint serves a canned reply
    pub api_key: Option<SecretString>,
    /// Chat completion model
    pub model: String,
    /// Chat API base URL
    pub api_base: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let catalog_path = PathBuf::from(get_env_or_default(
            "CATALOG_PATH",
            "crates/storefront/data/products.json",
        ));
        let cart_data_dir = PathBuf::from(get_env_or_default("CART_DATA_DIR", "data/carts"));
        let contact_log_path =
            PathBuf::from(get_env_or_default("CONTACT_LOG_PATH", "data/contact.jsonl"));

        let stripe = StripeConfig::from_env(&base_url)?;
        let chat = ChatConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            cart_data_dir,
            contact_log_path,
            stripe,
            chat,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StripeConfig {
    fn from_env(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            secret_key: SecretString::from(get_required_env("STRIPE_SECRET_KEY")?),
            api_base: get_env_or_default("STRIPE_API_BASE", "https://api.stripe.com"),
            success_url: get_env_or_default("STRIPE_SUCCESS_URL", &format!("{base_url}/success")),
            cancel_url: get_env_or_default("STRIPE_CANCEL_URL", &format!("{base_url}/cancel")),
        })
    }
}

impl ChatConfig {
    fn from_env() -> Self {
        Self {
            api_key: get_optional_env("OPENAI_API_KEY").map(SecretString::from),
            model: get_env_or_default("OPENAI_MODEL", "gpt-3.5-turbo"),
            api_base: get_env_or_default("OPENAI_API_BASE", "https://api.openai.com"),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
