//! Key-value storage port.
//!
//! The board persists its whole list as one string value under one key. This
//! module defines the minimal abstraction the board needs from a store: read a
//! key, overwrite a key, and remove a key.
//!
//! # Implementations
//!
//! - `FileKeyValueStore` (in the `todo-board` crate): one file per key in a
//!   data directory
//! - `InMemoryKeyValueStore` (in `todo-board-testing`): `HashMap`-backed test
//!   double
//!
//! # Example
//!
//! ```no_run
//! use todo_board_core::storage::{KeyValueStore, StorageError};
//!
//! fn example<S: KeyValueStore>(store: &S) -> Result<(), StorageError> {
//!     store.set("todos", "[]")?;
//!     assert_eq!(store.get("todos")?.as_deref(), Some("[]"));
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key cannot be represented by this store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The store exists but refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key-value store.
///
/// Values are opaque strings; the store never interprets them.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so an `Arc<dyn KeyValueStore>` can
/// live in an environment shared with the runtime.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`.
    ///
    /// # Returns
    ///
    /// - `Some(value)` if the key is present
    /// - `None` if it is absent
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
