//! Client-side shopping cart.
//!
//! [`CartStore`] is the single source of truth for the cart of one session.
//! It keeps an ordered list of [`CartLine`]s, writes the full list through a
//! [`CartRepository`] after every mutation, and notifies subscribers.
//!
//! # Invariants
//!
//! - at most one line per [`CartItemId`]
//! - every line has `quantity >= 1`
//! - lines keep the order in which they were first added
//!
//! # Persistence failures
//!
//! Mutators never fail. A failed write is logged, the in-memory cart keeps the
//! change, and the error is kept in [`CartStore::last_persist_error`] until the
//! next successful write.
//!
//! # Example
//!
//! ```rust
//! use glowvita_core::CartItemId;
//! use glowvita_storefront::cart::{CartStore, NewCartItem};
//!
//! let mut cart = CartStore::in_memory();
//! cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "A", 100.0, "/a.png"));
//! cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "A", 100.0, "/a.png"));
//!
//! assert_eq!(cart.cart().len(), 1);
//! assert_eq!(cart.cart_total(), 200.0);
//! ```

mod context;
mod line;
mod repository;

pub use context::CartContext;
pub use line::{CartLine, NewCartItem};
pub use repository::{CART_STORAGE_KEY, CartRepository, CartStorageError, StorageCartRepository};

use glowvita_core::CartItemId;
use tracing::{debug, warn};

use crate::storage::MemoryStorage;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[CartLine])>;

/// Mutable cart state backed by a persistence slot.
pub struct CartStore {
    lines: Vec<CartLine>,
    repository: Box<dyn CartRepository>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    last_persist_error: Option<CartStorageError>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Initialize the store from whatever `repository` holds.
    ///
    /// A stored value that is not a valid cart is discarded and the store
    /// starts empty. A medium that cannot be read also yields an empty cart,
    /// but its value is left alone.
    pub fn load(repository: impl CartRepository + 'static) -> Self {
        let lines = match repository.load() {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart");
                if e.is_bad_data() {
                    if let Err(clear_err) = repository.clear() {
                        warn!(error = %clear_err, "Failed to discard corrupt cart");
                    }
                }
                Vec::new()
            }
        };

        debug!(lines = lines.len(), "Cart loaded");

        Self {
            lines,
            repository: Box::new(repository),
            observers: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        }
    }

    /// Empty store persisted to a private in-memory slot.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(StorageCartRepository::new(MemoryStorage::new()))
    }

    /// Add one unit of `item`.
    ///
    /// An existing line with the same id gets `quantity + 1`; its captured
    /// name, price and image are kept. Otherwise a new line with quantity 1
    /// is appended.
    pub fn add_to_cart(&mut self, item: NewCartItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(item = %item.id, quantity = line.quantity, "Incremented cart line");
        } else {
            debug!(item = %item.id, "Added cart line");
            self.lines.push(item.into_line());
        }

        self.persist();
        self.notify();
    }

    /// Remove the line for `id`. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: CartItemId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() != before {
            debug!(item = %id, "Removed cart line");
        }

        self.persist();
        self.notify();
    }

    /// Set the quantity of the line for `id` to `max(1, quantity)`.
    ///
    /// Unknown ids are ignored. Quantities above `u32::MAX` saturate.
    pub fn update_quantity(&mut self, id: CartItemId, quantity: i64) {
        let quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
            debug!(item = %id, quantity, "Updated cart line quantity");
        }

        self.persist();
        self.notify();
    }

    /// Remove every line and delete the persisted cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        match self.repository.clear() {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to delete persisted cart");
                self.last_persist_error = Some(e);
            }
        }
        debug!("Cart cleared");

        self.notify();
    }

    /// Sum of `price * quantity` over all lines, computed on every call.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: CartItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent persistence failure, cleared by the next successful write.
    #[must_use]
    pub const fn last_persist_error(&self) -> Option<&CartStorageError> {
        self.last_persist_error.as_ref()
    }

    /// Register `observer` to receive the lines after every mutation.
    ///
    /// Observers run synchronously on the mutating call and must not call
    /// back into the same store.
    pub fn subscribe(&mut self, observer: impl FnMut(&[CartLine]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn persist(&mut self) {
        match self.repository.save(&self.lines) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, keeping in-memory state");
                self.last_persist_error = Some(e);
            }
        }
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.lines);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::storage::{KeyValueStore, StorageError};

    fn item(id: CartItemId, price: f64) -> NewCartItem {
        NewCartItem::new(id, format!("item {id}"), price, "/img.png")
    }

    fn store_with(storage: &MemoryStorage) -> CartStore {
        CartStore::load(StorageCartRepository::new(storage.clone()))
    }

    /// Storage whose writes can be switched off.
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.failing.get() {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.failing.get() {
                return Err(StorageError::Unavailable("storage disabled".to_string()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_scenario_walkthrough() {
        let mut cart = CartStore::in_memory();

        cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "A", 100.0, "/a.png"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.cart_total(), 100.0);

        cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "A", 100.0, "/a.png"));
        assert_eq!(cart.line(CartItemId::product(1)).unwrap().quantity, 2);
        assert_eq!(cart.cart_total(), 200.0);

        cart.add_to_cart(NewCartItem::new(CartItemId::product(2), "B", 50.0, "/b.png"));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.cart_total(), 250.0);

        cart.update_quantity(CartItemId::product(1), 0);
        assert_eq!(cart.line(CartItemId::product(1)).unwrap().quantity, 1);
        assert_eq!(cart.cart_total(), 150.0);

        cart.remove_from_cart(CartItemId::product(2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.cart_total(), 100.0);

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.cart_total(), 0.0);
    }

    #[test]
    fn test_repeated_add_dedups() {
        let mut cart = CartStore::in_memory();
        for _ in 0..5 {
            cart.add_to_cart(item(CartItemId::product(3), 150.0));
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.cart()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_keeps_captured_fields() {
        let mut cart = CartStore::in_memory();
        cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "Old", 10.0, "/old.png"));
        cart.add_to_cart(NewCartItem::new(CartItemId::product(1), "New", 99.0, "/new.png"));

        let line = cart.line(CartItemId::product(1)).unwrap();
        assert_eq!(line.name, "Old");
        assert_eq!(line.price, 10.0);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_product_and_offer_with_same_number_are_distinct() {
        let mut cart = CartStore::in_memory();
        cart.add_to_cart(item(CartItemId::product(7), 10.0));
        cart.add_to_cart(item(CartItemId::offer(7), 5.0));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.cart_total(), 15.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartStore::in_memory();
        let ids = [
            CartItemId::product(9),
            CartItemId::offer(1),
            CartItemId::product(2),
        ];
        for id in ids {
            cart.add_to_cart(item(id, 1.0));
        }
        cart.add_to_cart(item(CartItemId::product(9), 1.0));

        let order: Vec<_> = cart.cart().iter().map(|line| line.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_update_quantity_floor() {
        let mut cart = CartStore::in_memory();
        let id = CartItemId::product(1);
        cart.add_to_cart(item(id, 2.0));

        for (requested, expected) in [(5, 5), (1, 1), (0, 1), (-3, 1), (i64::MIN, 1)] {
            cart.update_quantity(id, requested);
            assert_eq!(cart.line(id).unwrap().quantity, expected);
        }

        cart.update_quantity(id, i64::MAX);
        assert_eq!(cart.line(id).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = CartStore::in_memory();
        cart.add_to_cart(item(CartItemId::product(1), 2.0));
        let before = cart.cart().to_vec();

        cart.remove_from_cart(CartItemId::product(42));
        cart.update_quantity(CartItemId::offer(1), 10);

        assert_eq!(cart.cart(), before.as_slice());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = MemoryStorage::new();
        let mut cart = store_with(&storage);

        cart.add_to_cart(item(CartItemId::product(1), 3.0));
        cart.update_quantity(CartItemId::product(1), 4);

        let reloaded = store_with(&storage);
        assert_eq!(reloaded.cart(), cart.cart());
        assert_eq!(reloaded.cart_total(), 12.0);
    }

    #[test]
    fn test_clear_deletes_persisted_blob() {
        let storage = MemoryStorage::new();
        let mut cart = store_with(&storage);
        cart.add_to_cart(item(CartItemId::product(1), 3.0));
        assert!(storage.contains(CART_STORAGE_KEY));

        cart.clear_cart();
        assert!(!storage.contains(CART_STORAGE_KEY));
        assert!(store_with(&storage).is_empty());
    }

    #[test]
    fn test_corrupt_blob_starts_empty_and_is_discarded() {
        let storage = MemoryStorage::with_entry(CART_STORAGE_KEY, "{ definitely not a cart");
        let cart = store_with(&storage);

        assert!(cart.is_empty());
        assert!(!storage.contains(CART_STORAGE_KEY));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let storage = FlakyStorage::default();
        let mut cart = CartStore::load(StorageCartRepository::new(storage.clone()));

        storage.failing.set(true);
        cart.add_to_cart(item(CartItemId::product(1), 8.0));
        assert_eq!(cart.len(), 1);
        assert!(matches!(
            cart.last_persist_error(),
            Some(CartStorageError::Storage(StorageError::Unavailable(_)))
        ));

        storage.failing.set(false);
        cart.add_to_cart(item(CartItemId::product(1), 8.0));
        assert!(cart.last_persist_error().is_none());

        let reloaded = CartStore::load(StorageCartRepository::new(storage));
        assert_eq!(reloaded.line(CartItemId::product(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_observers_receive_every_mutation() {
        let mut cart = CartStore::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let sub = cart.subscribe(move |lines| sink.borrow_mut().push(lines.len()));

        cart.add_to_cart(item(CartItemId::product(1), 1.0));
        cart.add_to_cart(item(CartItemId::product(2), 1.0));
        cart.remove_from_cart(CartItemId::product(1));
        cart.clear_cart();
        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);

        assert!(cart.unsubscribe(sub));
        assert!(!cart.unsubscribe(sub));
        cart.add_to_cart(item(CartItemId::product(3), 1.0));
        assert_eq!(seen.borrow().len(), 4);
    }
}
