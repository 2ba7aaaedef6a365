//! Core error types for the cart.

use thiserror::Error;

/// Core error type for cart operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart data violates an invariant.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key-value store could not complete a read or write.
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// IO error from a storage backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns true if the error comes from malformed data rather than the
    /// storage medium.
    pub fn is_data_error(&self) -> bool {
        matches!(self, CoreError::InvalidData(_) | CoreError::Serialization(_))
    }
}
