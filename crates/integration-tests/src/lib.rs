//! Integration tests for the Glowvita storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p glowvita-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart store behavior through the public API
//! - `cart_persistence` - Reloading carts from memory and file storage
//! - `checkout_flow` - Order placement against a recording gateway
//!
//! This crate also exports small fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use glowvita_core::CartItemId;
use glowvita_storefront::cart::{CartStore, NewCartItem, StorageCartRepository};
use glowvita_storefront::storage::MemoryStorage;

/// An item with a name and image derived from its id.
#[must_use]
pub fn item(id: CartItemId, price: f64) -> NewCartItem {
    NewCartItem::new(id, format!("item {id}"), price, format!("/img/{id}.png"))
}

/// A store persisted to `storage`.
#[must_use]
pub fn store_on(storage: &MemoryStorage) -> CartStore {
    CartStore::load(StorageCartRepository::new(storage.clone()))
}

/// Compare money amounts produced by float arithmetic.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
