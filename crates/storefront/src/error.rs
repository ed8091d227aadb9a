//! Unified error handling.
//!
//! Library modules return their own error enums; binaries and embedding
//! applications work with [`AppError`], which wraps all of them.

use thiserror::Error;

use crate::cart::CartStorageError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage medium failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart persistence failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartStorageError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_)
                | Self::Checkout(CheckoutError::EmptyCart | CheckoutError::InvalidShipping { .. })
        )
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::Internal(format!("invalid backend URL: {err}"))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
