//! Verdant Core - Shared cart and checkout domain logic.
//!
//! This crate provides the domain model used across all Verdant components:
//! - `storefront` - Public-facing e-commerce site
//! - `cli` - Command-line tools for catalog management
//!
//! # Architecture
//!
//! The core crate contains types, traits, and pure logic - no I/O, no HTTP
//! clients. Storage ([`cart::CartPersistence`]) and catalog access
//! ([`checkout::CatalogLookup`]) are capability traits implemented by the
//! consuming binaries, which keeps the cart and checkout logic independently
//! testable.
//!
//! # Modules
//!
//! - [`types`] - Products, money conversion, and the cart data model
//! - [`cart`] - The single-writer cart store and its persistence capability
//! - [`checkout`] - Translation of a cart into a gateway-ready checkout session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{CartError, CartPersistence, CartStore};
pub use checkout::{CatalogLookup, CheckoutError, CheckoutSession, LineItem};
pub use types::{Cart, CartItem, InvalidCartSnapshot, Product, ProductId};
