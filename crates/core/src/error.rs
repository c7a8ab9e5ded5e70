//! Error types for heap access, dehydration and hydration

use crate::heap::NodeId;
use crate::record::RecordType;
use thiserror::Error;

/// Errors raised by the heap and the dehydrate/hydrate engine.
///
/// Every error is fatal to the call that raised it. The operations are
/// deterministic, so none of these are retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Value category with no record encoding (host objects, builtin
    /// constructors in value positions)
    #[error("unsupported value: {what}")]
    Unsupported {
        /// Description of the offending value
        what: String,
    },

    /// Function nodes or records were encountered but function support is off
    #[error("function support is disabled")]
    FunctionsDisabled,

    /// An own property collides with a reserved record key
    #[error("property name {key:?} is reserved")]
    ReservedKey {
        /// The property name
        key: String,
    },

    /// Handle does not belong to the heap
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// Operation applied to a node of the wrong kind
    #[error("wrong kind: expected {expected}, got {actual}")]
    WrongKind {
        /// Kind the operation needs
        expected: &'static str,
        /// Kind of the node
        actual: String,
    },

    /// Record sequence with no records
    #[error("record sequence is empty")]
    EmptySequence,

    /// Reference index outside the record sequence
    #[error("reference to record {index} but sequence has {len} records")]
    DanglingReference {
        /// Referenced index
        index: usize,
        /// Length of the sequence
        len: usize,
    },

    /// Record `source` shape does not fit its declared type
    #[error("record {index}: source does not match type {record_type}")]
    SourceMismatch {
        /// Record position
        index: usize,
        /// Declared record type
        record_type: RecordType,
    },

    /// Unknown or repeated regular expression flag
    #[error("invalid regexp flags: {flags:?}")]
    InvalidFlags {
        /// The flag string
        flags: String,
    },

    /// Reserved prototype key holds neither null nor a reference, or closes
    /// a prototype cycle
    #[error("record {index}: prototype must be null or a reference outside its own chain")]
    InvalidPrototype {
        /// Record position
        index: usize,
    },

    /// Every node handle is in use
    #[error("heap is full: {len} nodes")]
    HeapFull {
        /// Node count at the failed allocation
        len: usize,
    },

    /// Sequence exceeds the configured record limit
    #[error("record limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        /// Configured limit
        limit: usize,
        /// Sequence length
        actual: usize,
    },
}

/// Result type for heap and engine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error means the input record sequence is malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::EmptySequence
                | Error::DanglingReference { .. }
                | Error::SourceMismatch { .. }
                | Error::InvalidFlags { .. }
                | Error::InvalidPrototype { .. }
        )
    }

    /// Check if this error reports a value the engine cannot encode.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. } | Error::ReservedKey { .. })
    }
}
