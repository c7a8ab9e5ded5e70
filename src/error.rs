//! Unified error types for Marrow.
//!
//! This module provides a clean error type that wraps the engine and wire
//! errors and presents a consistent interface to users.

use thiserror::Error;

/// All Marrow errors.
///
/// This is the canonical error type for the facade operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Value the record format cannot express
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Input refused by the trust configuration (functions, record limit) or
    /// too large for the heap
    #[error("untrusted input: {0}")]
    Untrusted(String),

    /// Record sequence that cannot be hydrated
    #[error("malformed: {0}")]
    Malformed(String),

    /// JSON transport could not be decoded
    #[error("wire error: {0}")]
    Wire(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Marrow operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the input was rejected as malformed, at either layer.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed(_) | Error::Wire(_))
    }

    /// Check if this is an unsupported-value error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }

    /// Check if the trust configuration refused the input.
    pub fn is_untrusted(&self) -> bool {
        matches!(self, Error::Untrusted(_))
    }
}

// Convert from engine errors
impl From<marrow_core::Error> for Error {
    fn from(e: marrow_core::Error) -> Self {
        use marrow_core::Error as CoreError;
        let msg = e.to_string();
        match e {
            CoreError::Unsupported { .. } | CoreError::ReservedKey { .. } => {
                Error::Unsupported(msg)
            }
            CoreError::FunctionsDisabled
            | CoreError::LimitExceeded { .. }
            | CoreError::HeapFull { .. } => Error::Untrusted(msg),
            CoreError::EmptySequence
            | CoreError::DanglingReference { .. }
            | CoreError::SourceMismatch { .. }
            | CoreError::InvalidFlags { .. }
            | CoreError::InvalidPrototype { .. } => Error::Malformed(msg),
            CoreError::NodeNotFound(_) | CoreError::WrongKind { .. } => Error::Internal(msg),
        }
    }
}

// Convert from wire decode errors
impl From<marrow_wire::DecodeError> for Error {
    fn from(e: marrow_wire::DecodeError) -> Self {
        Error::Wire(e.to_string())
    }
}
