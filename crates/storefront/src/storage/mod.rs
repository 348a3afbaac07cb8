//! Durable key/value storage for catalog state.
//!
//! The store depends on [`KeyValueStore`] rather than on a concrete backend,
//! so catalog transitions can be tested against [`MemoryStore`] and the
//! server runs against [`FileStore`].
//!
//! Values are opaque strings; callers decide the encoding (the catalog is a
//! JSON array of products under [`CATALOG_KEY`]).

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the serialized product catalog.
pub const CATALOG_KEY: &str = "luxelane-products";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for key {key:?}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A value could not be encoded or decoded.
    #[error("serialization failed for key {key:?}: {source}")]
    Serialization {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key/value storage.
///
/// Mirrors browser-style local storage: reads return `None` for missing keys,
/// writes replace the whole value.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
