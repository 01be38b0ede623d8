//! Core types for Verdant.
//!
//! This module provides the product, money, and cart data model.

pub mod cart;
pub mod money;
pub mod product;

pub use cart::{Cart, CartItem, InvalidCartSnapshot};
pub use product::{Product, ProductId};
