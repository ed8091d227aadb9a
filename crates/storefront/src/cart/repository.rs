//! Cart persistence.
//!
//! The whole cart is stored as one JSON array under [`CART_STORAGE_KEY`].
//! Nothing else reads or writes that key.

use std::collections::HashSet;

use thiserror::Error;

use super::line::CartLine;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors raised while loading or storing the cart.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// The storage medium failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not a JSON cart.
    #[error("corrupt cart data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The stored value parsed but breaks a cart invariant.
    #[error("invalid cart data: {0}")]
    Invalid(String),
}

impl CartStorageError {
    /// Whether the stored value itself is bad (as opposed to the medium).
    #[must_use]
    pub const fn is_bad_data(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::Invalid(_))
    }
}

/// Load/save/clear access to the persisted cart.
pub trait CartRepository {
    /// Read the persisted cart. An absent value is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError` if the medium fails or the value is not a
    /// valid cart.
    fn load(&self) -> Result<Vec<CartLine>, CartStorageError>;

    /// Replace the persisted cart with `lines`.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError` if the write fails.
    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError>;

    /// Delete the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError` if the delete fails.
    fn clear(&self) -> Result<(), CartStorageError>;
}

/// [`CartRepository`] over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct StorageCartRepository<S> {
    storage: S,
}

impl<S: KeyValueStore> StorageCartRepository<S> {
    /// Create a repository writing to `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage medium.
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStore> CartRepository for StorageCartRepository<S> {
    fn load(&self) -> Result<Vec<CartLine>, CartStorageError> {
        let Some(raw) = self.storage.get(CART_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        let lines: Vec<CartLine> = serde_json::from_str(&raw)?;
        validate(&lines)?;
        Ok(lines)
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError> {
        let raw = serde_json::to_string(lines)?;
        self.storage.set(CART_STORAGE_KEY, &raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CartStorageError> {
        self.storage.remove(CART_STORAGE_KEY)?;
        Ok(())
    }
}

/// Reject persisted carts that could not have been produced by `CartStore`.
fn validate(lines: &[CartLine]) -> Result<(), CartStorageError> {
    let mut seen = HashSet::with_capacity(lines.len());

    for line in lines {
        if line.quantity == 0 {
            return Err(CartStorageError::Invalid(format!(
                "line {} has quantity 0",
                line.id
            )));
        }
        if !line.price.is_finite() {
            return Err(CartStorageError::Invalid(format!(
                "line {} has a non-finite price",
                line.id
            )));
        }
        if !seen.insert(line.id) {
            return Err(CartStorageError::Invalid(format!(
                "duplicate line {}",
                line.id
            )));
        }
    }

    Ok(())
}
