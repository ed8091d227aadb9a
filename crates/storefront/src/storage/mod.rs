//! Key-value storage media for client-side state.
//!
//! A [`KeyValueStore`] is the equivalent of a browser's local storage: string
//! keys, string values, synchronous access. The cart repository decides what
//! goes in it; the store only decides where the bytes live.
//!
//! # Implementations
//!
//! - [`MemoryStorage`] - in-process map, shared between clones
//! - [`FileStorage`] - one file per key inside a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be represented by this medium.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The medium refused the write (full, disabled, read-only).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
