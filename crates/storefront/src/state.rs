//! Application state shared across handlers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Weak};

use verdant_core::cart::CartStore;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::persistence::JsonFileStore;
use crate::services::{ChatClient, ContactSink, JsonlContactSink, StripeClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the per-cart stores, and the external service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    stripe: StripeClient,
    chat: ChatClient,
    contact: Arc<dyn ContactSink>,
    /// Live cart stores keyed by cart id. Sharing one store per cart id is
    /// what serializes concurrent mutations for the same cart, so entries
    /// hold `Weak` references: a store still referenced by an in-flight
    /// request is always rediscovered, never rebuilt alongside it. A second
    /// store for the same cart would mean a second lock, and its save could
    /// overwrite a concurrent mutation.
    carts: Mutex<HashMap<String, Weak<CartStore>>>,
    cart_data_dir: PathBuf,
}

impl AppState {
    /// Create a new application state, loading the catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is missing or invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");

        let stripe = StripeClient::new(&config.stripe);
        let chat = ChatClient::new(&config.chat);
        let contact = Arc::new(JsonlContactSink::new(config.contact_log_path.clone()));

        let cart_data_dir = config.cart_data_dir.clone();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                stripe,
                chat,
                contact,
                carts: Mutex::new(HashMap::new()),
                cart_data_dir,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the Stripe client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get a reference to the chat client.
    #[must_use]
    pub fn chat(&self) -> &ChatClient {
        &self.inner.chat
    }

    /// Get a reference to the contact sink.
    #[must_use]
    pub fn contact(&self) -> &dyn ContactSink {
        self.inner.contact.as_ref()
    }

    /// Get (or restore from disk) the single-writer cart store for `cart_id`.
    #[must_use]
    pub fn cart_store(&self, cart_id: &str) -> Arc<CartStore> {
        let mut carts = self
            .inner
            .carts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(store) = carts.get(cart_id).and_then(Weak::upgrade) {
            return store;
        }

        // Stores whose last handle was dropped leave dead entries behind;
        // sweep them before inserting so the map only grows with live carts.
        carts.retain(|_, store| store.strong_count() > 0);

        let store = Arc::new(CartStore::new(JsonFileStore::new(
            &self.inner.cart_data_dir,
            cart_id,
        )));
        carts.insert(cart_id.to_owned(), Arc::downgrade(&store));
        store
    }
}
