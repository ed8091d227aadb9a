//! Application state shared across consumers.

use std::rc::Rc;

use crate::cart::{CartContext, CartStore, StorageCartRepository};
use crate::config::StorefrontConfig;
use crate::orders::RestOrderGateway;
use crate::storage::FileStorage;

/// State created once at the application root.
///
/// This struct is cheaply cloneable via `Rc` and gives every consumer the same
/// configuration and cart.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Rc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    cart: CartContext,
}

impl AppState {
    /// Create state whose cart lives in `config.data_dir`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storage = FileStorage::new(&config.data_dir);
        let store = CartStore::load(StorageCartRepository::new(storage));
        Self::with_cart(config, CartContext::provide(store))
    }

    /// Create state around an existing cart context.
    #[must_use]
    pub fn with_cart(config: StorefrontConfig, cart: CartContext) -> Self {
        Self {
            inner: Rc::new(AppStateInner { config, cart }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the shared cart.
    #[must_use]
    pub fn cart(&self) -> &CartContext {
        &self.inner.cart
    }

    /// Build an order gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is configured or its URL is unusable.
    pub fn order_gateway(&self) -> crate::error::Result<RestOrderGateway> {
        let backend = self.inner.config.require_backend()?;
        Ok(RestOrderGateway::new(backend)?)
    }
}
