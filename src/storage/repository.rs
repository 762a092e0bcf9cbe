use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::StorageError;

/// Trait for the host's durable key-value store
///
/// Values are raw JSON text. A `get` for a key that was never written
/// returns `Ok(None)`; parsing is left to the caller so that a corrupt
/// value can be told apart from a failed read.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory implementation of KeyValueStore for development and testing
///
/// Data lives for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a store with pre-populated raw values
    pub fn with_entries(entries: Vec<(&str, &str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the raw stored value for a key (useful for debugging)
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        let value = entries.get(key).cloned();
        debug!(key = %key, found = value.is_some(), "Read key from memory");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        debug!(key = %key, bytes = value.len(), "Writing key to memory");
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
