//! Trait definitions for cart storage.

use async_trait::async_trait;
use std::time::SystemTime;

use crate::error::CoreError;

/// Asynchronous string key-value storage the cart is persisted into.
///
/// Implementors are responsible for:
/// - Returning `Ok(None)` for keys that were never written
/// - Replacing the whole value on `set` (no partial writes)
/// - Mapping medium failures to `CoreError::Storage` or `CoreError::Io`
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// When the value under `key` was last written, if the backend tracks it.
    async fn modified(&self, _key: &str) -> Result<Option<SystemTime>, CoreError> {
        Ok(None)
    }

    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &'static str {
        "custom"
    }
}
