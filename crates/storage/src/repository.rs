use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the session token is kept.
pub const TOKEN_KEY: &str = "token";

/// Scope used when no tab name is configured.
pub const DEFAULT_SCOPE: &str = "main";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Per-tab string storage.
///
/// Values are grouped by scope (one scope per tab) and replaced wholesale on
/// write. Nothing outlives a scope being cleared.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop every value in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self, scope: &str) -> Result<(), StorageError>;
}

/// Process-lifetime storage. Used when the tab should not survive a relaunch,
/// and in tests.
#[derive(Clone, Default)]
pub struct InMemorySessionStorage {
    values: Arc<Mutex<HashMap<(String, String), String>>>,
}

impl InMemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&(scope.to_owned(), key.to_owned())).cloned())
    }

    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert((scope.to_owned(), key.to_owned()), value.to_owned());
        Ok(())
    }

    async fn clear(&self, scope: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.retain(|(entry_scope, _), _| entry_scope != scope);
        Ok(())
    }
}

/// Session storage behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStorage>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let session: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
        Self { session }
    }
}
