use std::io;
use thiserror::Error;

/// Durable storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored data could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Database backend reported an error
    #[error("database error: {0}")]
    Database(String),

    /// Storage backend is not reachable
    #[error("storage not available")]
    NotAvailable,
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Errors that can occur during queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    // ===== Contract Errors =====
    /// Invalid argument provided (malformed shuffle rebuild request, bad range)
    #[error("invalid argument: {name} - {message}")]
    InvalidArgument {
        /// The name of the argument
        name: String,
        /// Description of the error
        message: String,
    },

    /// Slot index outside the current timeline
    #[error("index {index} out of range (length: {len})")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Timeline length at the time of the request
        len: usize,
    },

    // ===== Collaborator Errors =====
    /// Durable storage read or write failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Track repository failed to resolve identifiers
    #[error("repository error: {message}")]
    Repository {
        /// Description of the failure
        message: String,
    },

    /// The playback thread has shut down
    #[error("playback engine unavailable")]
    EngineUnavailable,
}

impl QueueError {
    /// Shorthand for [`QueueError::InvalidArgument`]
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this error is recoverable by retrying
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Repository { .. })
    }

    /// Check if this error indicates a violated caller contract
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

/// Result type alias for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
