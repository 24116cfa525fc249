//! Key/value storage backends
//!
//! The list and its settings live in named string slots:
//! - `LocalStorage`: browser `window.localStorage` (wasm32 only)
//! - `MemoryStorage`: in-process map for native runs and tests
//!
//! Reads and writes are synchronous. Every call is fallible so callers decide
//! whether a failure is logged, ignored or propagated.

mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

use thiserror::Error;

/// Failure reported by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage is reachable (no window, storage disabled by the browser)
    #[error("storage is unavailable")]
    Unavailable,
    /// The backend refused the write because it is full
    #[error("storage quota exceeded writing {len} bytes to `{key}`")]
    QuotaExceeded { key: String, len: usize },
    /// Any other backend error, carrying its message
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string key/value store
pub trait Storage {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot with `value`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot; removing an absent slot is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
