//! Core types for Marrow
//!
//! This crate defines the host value model the engine walks and the record
//! format it produces:
//! - [`Heap`], [`Node`], [`NodeKind`], [`NodeId`]: the arena of object-like nodes
//! - [`Value`]: what every slot of a node holds
//! - [`Builtin`]: the registry of intrinsic constructors and prototypes
//! - [`Record`], [`RecordSequence`], [`Encoded`]: the flat serialized form

#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod heap;
pub mod record;
pub mod regexp;
pub mod value;

pub use builtins::{is_native_constructor, is_native_prototype, Builtin};
pub use error::{Error, Result};
pub use heap::{Checkpoint, Heap, Node, NodeId, NodeKind, Property, Prototype};
pub use record::{
    Encoded, Literal, Record, RecordSequence, RecordType, Slot, Source, CONSTRUCTOR_KEY,
    PROTOTYPE_KEY,
};
pub use regexp::{RegExp, RegExpFlags};
pub use value::Value;
