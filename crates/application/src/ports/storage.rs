//! Durable key-value storage port for session state.

use thiserror::Error;

/// Errors from the durable session storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The underlying store could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A stored value could not be serialized or parsed.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Port for the durable slot behind [`crate::TokenStore`] and
/// [`crate::OrgContext`].
///
/// Reads and writes are synchronous: the stores keep an in-memory cache
/// as the hot-path authority and only touch this port at initialization,
/// on writes (write-through) and when an external change is signalled.
/// Any execution context sharing the same backing store (another process
/// against the same directory, for instance) observes the same entries.
pub trait SessionStorage: Send + Sync {
    /// Reads the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the entry under `key`; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
