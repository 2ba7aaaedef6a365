//! In-memory key-value storage.

use async_trait::async_trait;
use gomarketplace_core::{CoreError, KeyValueStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key-value storage held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").await.unwrap().is_none());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_replaces() {
        let storage = MemoryStorage::with_value("k", "one");
        storage.set("k", "two").await.unwrap();

        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(storage.len().await, 1);
    }
}
