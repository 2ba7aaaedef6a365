//! Store error types.

use gomarketplace_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),

    /// The stored cart blob could not be decoded.
    #[error("Stored cart under {key} is corrupt: {source}")]
    Corrupt {
        /// Storage key that held the blob.
        key: String,
        /// Decode failure.
        #[source]
        source: CoreError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Storage(e) => !e.is_data_error(),
            StoreError::Io(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StoreError::Storage(CoreError::Storage("offline".into())).is_transient());
        assert!(!StoreError::Storage(CoreError::InvalidData("dup".into())).is_transient());
        assert!(!StoreError::Config("bad".into()).is_transient());

        let corrupt = StoreError::Corrupt {
            key: "k".into(),
            source: CoreError::InvalidData("dup".into()),
        };
        assert!(!corrupt.is_transient());
        assert!(corrupt.to_string().contains("k"));
    }
}
