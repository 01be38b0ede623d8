//! The single-writer cart store.
//!
//! [`CartStore`] owns the in-memory cart behind a mutex and drives a
//! [`CartPersistence`] capability. Every mutation persists the new state
//! before returning a snapshot, so within one process the next load always
//! observes the latest saved cart.

use std::sync::Mutex;

use thiserror::Error;

use crate::types::{Cart, Product, ProductId};

/// Errors from cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A zero quantity was passed to `add_item`. The cart is unchanged.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Durable key-value slot for a serialized cart snapshot.
///
/// The store never depends on a concrete storage medium - file, in-memory,
/// or remote key-value - only on this capability, so the medium is swappable
/// without touching cart logic.
pub trait CartPersistence: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// Returns `None` both when nothing is stored and when the stored data
    /// is corrupt (wrong shape, zero quantity, negative price). Corrupt data
    /// is discarded by the implementation, never surfaced as an error.
    fn load(&self) -> Option<Cart>;

    /// Persist a snapshot, best effort. Implementations swallow and log
    /// failures; a failed save must never fail the mutation that caused it.
    fn save(&self, cart: &Cart);
}

/// Owns the in-memory cart and applies mutations under the cart invariants.
///
/// `add_item`, `remove_item`, and `clear` serialize on an internal mutex so
/// concurrent adds for the same product can never drop an increment. Reads
/// return owned snapshots, safe to hold across further mutations.
pub struct CartStore {
    state: Mutex<Cart>,
    persistence: Box<dyn CartPersistence>,
}

impl CartStore {
    /// Create a store, restoring the persisted cart if one exists.
    ///
    /// Initialization never fails: an absent or corrupt snapshot degrades to
    /// an empty cart.
    pub fn new(persistence: impl CartPersistence + 'static) -> Self {
        let initial = persistence.load().unwrap_or_default();
        Self {
            state: Mutex::new(initial),
            persistence: Box::new(persistence),
        }
    }

    /// Add `quantity` units of `product`, snapshotting its current title and
    /// price. An existing entry for the same product increments instead of
    /// duplicating. Persists the new state.
    ///
    /// # Errors
    ///
    /// [`CartError::InvalidQuantity`] when `quantity` is zero; the cart and
    /// its persisted form are left untouched.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<Cart, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        Ok(self.mutate(|cart| cart.merge(product, quantity)))
    }

    /// Remove the entry for `product_id`. A no-op when absent, never an
    /// error. Persists the new state.
    pub fn remove_item(&self, product_id: &ProductId) -> Cart {
        self.mutate(|cart| cart.remove(product_id))
    }

    /// Reset to an empty cart. Persists the new state.
    pub fn clear(&self) -> Cart {
        self.mutate(Cart::reset)
    }

    /// Read-only snapshot of the current cart. No side effects.
    pub fn state(&self) -> Cart {
        self.lock().clone()
    }

    /// Apply a mutation and persist the result while still holding the lock,
    /// so persisted snapshots are written in mutation order.
    fn mutate(&self, f: impl FnOnce(&mut Cart)) -> Cart {
        let mut cart = self.lock();
        f(&mut cart);
        self.persistence.save(&cart);
        cart.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        // A poisoned lock only means another writer panicked mid-mutation;
        // the cart itself is still structurally valid.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("state", &self.lock()).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::ProductId;

    /// Test persistence that records every saved snapshot.
    #[derive(Default)]
    struct RecordingStore {
        stored: Arc<Mutex<Option<Cart>>>,
        saves: Arc<Mutex<u32>>,
    }

    impl CartPersistence for RecordingStore {
        fn load(&self) -> Option<Cart> {
            self.stored.lock().unwrap().clone()
        }

        fn save(&self, cart: &Cart) {
            *self.stored.lock().unwrap() = Some(cart.clone());
            *self.saves.lock().unwrap() += 1;
        }
    }

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            image: None,
        }
    }

    #[test]
    fn test_add_merges_quantity() {
        let store = CartStore::new(RecordingStore::default());
        store.add_item(&product("X", "5.00"), 1).unwrap();
        let cart = store.add_item(&product("X", "5.00"), 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_zero_quantity_rejected_without_mutation() {
        let persistence = RecordingStore::default();
        let saves = Arc::clone(&persistence.saves);
        let store = CartStore::new(persistence);

        assert_eq!(
            store.add_item(&product("X", "5.00"), 0),
            Err(CartError::InvalidQuantity)
        );
        assert!(store.state().is_empty());
        assert_eq!(*saves.lock().unwrap(), 0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let persistence = RecordingStore::default();
        let saves = Arc::clone(&persistence.saves);
        let stored = Arc::clone(&persistence.stored);
        let store = CartStore::new(persistence);

        store.add_item(&product("X", "5.00"), 1).unwrap();
        store.remove_item(&ProductId::new("X"));
        store.clear();

        assert_eq!(*saves.lock().unwrap(), 3);
        assert!(stored.lock().unwrap().as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_restores_persisted_cart() {
        let persistence = RecordingStore::default();
        let stored = Arc::clone(&persistence.stored);
        {
            let seed = CartStore::new(RecordingStore {
                stored: Arc::clone(&stored),
                saves: Arc::default(),
            });
            seed.add_item(&product("X", "5.00"), 2).unwrap();
        }

        let store = CartStore::new(persistence);
        let cart = store.state();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_state_has_no_side_effects() {
        let persistence = RecordingStore::default();
        let saves = Arc::clone(&persistence.saves);
        let store = CartStore::new(persistence);
        let _ = store.state();
        assert_eq!(*saves.lock().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_adds_never_drop_increments() {
        let store = Arc::new(CartStore::new(RecordingStore::default()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store.add_item(&product("X", "5.00"), 1).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.state().items()[0].quantity, 400);
    }
}
