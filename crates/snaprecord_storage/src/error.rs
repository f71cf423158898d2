//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored collection could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] snaprecord_codec::CodecError),

    /// A key-value store was constructed without a client.
    #[error("no key-value client supplied")]
    MissingClient,

    /// The key-value client reported a failure.
    #[error("key-value client error: {0}")]
    Client(String),
}

impl StorageError {
    /// Creates a client error.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// Returns true for failures of the storage medium itself.
    ///
    /// These are the failures a record write reports as an unsuccessful
    /// save rather than as an error.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Client(_))
    }
}
