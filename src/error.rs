//! Error types for the storage layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type shared by all storage backends.
///
/// The cache engine itself only raises `EncodingFailed`/`DecodingFailed`
/// (from the typed layer) and `Internal` for structural faults; a missing
/// or expired key is a normal `None` result, never an error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Value could not be serialized for the given key
    #[error("Encoding failed for key: {0}")]
    EncodingFailed(String),

    /// Stored payload could not be deserialized for the given key
    #[error("Decoding failed for key: {0}")]
    DecodingFailed(String),

    /// Backend returned data in an unusable shape
    #[error("Invalid data in store")]
    InvalidData,

    /// Underlying storage facility is not available
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Structural fault wrapping the underlying condition
    #[error("Internal storage error")]
    Internal(#[from] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_key() {
        let err = StoreError::EncodingFailed("user.profile".to_string());
        assert_eq!(err.to_string(), "Encoding failed for key: user.profile");

        let err = StoreError::DecodingFailed("user.profile".to_string());
        assert_eq!(err.to_string(), "Decoding failed for key: user.profile");
    }

    #[test]
    fn test_internal_wraps_source() {
        let err: StoreError = anyhow::anyhow!("allocation failure").into();
        assert!(matches!(err, StoreError::Internal(_)));
    }
}
