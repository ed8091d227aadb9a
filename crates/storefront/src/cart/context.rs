//! Shared cart handle for the component tree.

use std::cell::RefCell;
use std::rc::Rc;

use glowvita_core::CartItemId;

use super::{CartLine, CartStore, NewCartItem, SubscriptionId};

/// Cheaply cloneable handle to one [`CartStore`].
///
/// Create it once at the application root with [`CartContext::provide`] and
/// pass clones down to every page and component that needs the cart. All
/// clones see the same cart. The handle is single-threaded, matching the UI
/// event loop that drives it.
#[derive(Debug, Clone)]
pub struct CartContext {
    inner: Rc<RefCell<CartStore>>,
}

impl CartContext {
    /// Wrap `store` so it can be shared.
    #[must_use]
    pub fn provide(store: CartStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// See [`CartStore::add_to_cart`].
    pub fn add_to_cart(&self, item: NewCartItem) {
        self.inner.borrow_mut().add_to_cart(item);
    }

    /// See [`CartStore::remove_from_cart`].
    pub fn remove_from_cart(&self, id: CartItemId) {
        self.inner.borrow_mut().remove_from_cart(id);
    }

    /// See [`CartStore::update_quantity`].
    pub fn update_quantity(&self, id: CartItemId, quantity: i64) {
        self.inner.borrow_mut().update_quantity(id, quantity);
    }

    /// See [`CartStore::clear_cart`].
    pub fn clear_cart(&self) {
        self.inner.borrow_mut().clear_cart();
    }

    /// See [`CartStore::cart_total`].
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.inner.borrow().cart_total()
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn cart(&self) -> Vec<CartLine> {
        self.inner.borrow().cart().to_vec()
    }

    /// Run `f` over the current lines without copying them.
    pub fn with_cart<R>(&self, f: impl FnOnce(&[CartLine]) -> R) -> R {
        f(self.inner.borrow().cart())
    }

    /// See [`CartStore::item_count`].
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner.borrow().item_count()
    }

    /// See [`CartStore::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Message of the most recent persistence failure, if any.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<String> {
        self.inner
            .borrow()
            .last_persist_error()
            .map(ToString::to_string)
    }

    /// See [`CartStore::subscribe`]. The observer must not use this context.
    pub fn subscribe(&self, observer: impl FnMut(&[CartLine]) + 'static) -> SubscriptionId {
        self.inner.borrow_mut().subscribe(observer)
    }

    /// See [`CartStore::unsubscribe`].
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().unsubscribe(id)
    }
}
