//! Storage abstraction for persistence.
//!
//! Projects are persisted through a small string key-value store, mirroring
//! browser local storage. Values are JSON documents.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key holding the saved-project collection.
pub const SAVED_PROJECTS_KEY: &str = "savedProjects";

/// Key holding the active project.
pub const CURRENT_PROJECT_KEY: &str = "currentProject";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for string key-value storage backends.
///
/// Operations are synchronous. Implementations use interior mutability so a
/// shared reference is enough to write.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Read and deserialize a JSON value.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", key, e))),
        None => Ok(None),
    }
}

/// Serialize and store a JSON value.
pub fn save_json<T: Serialize + ?Sized>(store: &impl KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize {}: {}", key, e)))?;
    store.set(key, &json)
}
