//! Error types for snaprecord core.

use crate::hooks::HookPoint;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in snaprecord core operations.
///
/// Storage write failures during `save` and `destroy` are not reported
/// through this type; those operations return `Ok(false)` instead.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage adapter error.
    #[error("storage error: {0}")]
    Storage(#[from] snaprecord_storage::StorageError),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] snaprecord_codec::CodecError),

    /// A lifecycle hook failed.
    #[error("{point} hook failed: {message}")]
    Hook {
        /// The hook point that was running.
        point: HookPoint,
        /// Description of the failure.
        message: String,
    },

    /// Record type not registered.
    #[error("record type not found: {name}")]
    TypeNotFound {
        /// Name of the record type.
        name: String,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates a hook failure error.
    pub fn hook(point: HookPoint, message: impl Into<String>) -> Self {
        Self::Hook {
            point,
            message: message.into(),
        }
    }

    /// Creates a type not found error.
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}
