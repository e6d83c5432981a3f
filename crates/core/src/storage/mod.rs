//! Synchronous string key-value storage.
//!
//! [`KeyValueStorage`] mirrors the browser's Web Storage API: string keys,
//! string values, synchronous calls that may fail (quota exceeded, storage
//! disabled). The cart store only needs this trait, so it can run against
//! `window.localStorage`, a file on disk, or an in-memory map.

mod file;
mod memory;
#[cfg(feature = "web")]
mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "web")]
pub use web::WebStorage;

use thiserror::Error;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or not available in this context.
    #[error("storage is unavailable")]
    Unavailable,

    /// The write would exceed the backend's capacity.
    #[error("storage quota of {limit} bytes exceeded")]
    QuotaExceeded {
        /// Capacity in bytes.
        limit: usize,
    },

    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds data that cannot be read as a key-value map.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A synchronous, string-keyed store.
pub trait KeyValueStorage {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Succeeds even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
