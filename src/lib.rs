//! # Marrow
//!
//! Cycle-safe serialization of in-memory value graphs.
//!
//! Marrow flattens the graph reachable from a value into a sequence of
//! records, one per object-like node, with every node-to-node edge replaced
//! by the index of the target record. Shared nodes are emitted once and
//! cycles terminate. Deserialization reverses the process and rebuilds the
//! same topology on a [`Heap`].
//!
//! ## Quick Start
//!
//! ```
//! use marrow::prelude::*;
//!
//! let mut heap = Heap::new();
//! let a = heap.alloc_object();
//! let b = heap.alloc_object();
//! heap.set(a, "b", Value::Node(b)).unwrap();
//! heap.set(b, "a", Value::Node(a)).unwrap();
//!
//! let json = to_json(&heap, &Value::Node(a)).unwrap();
//! let copy = from_json(&mut heap, &json).unwrap();
//! assert!(heap.structurally_equal(&Value::Node(a), &heap, &copy));
//! ```
//!
//! ## Layers
//!
//! - [`serialize`] / [`deserialize`] - value graph to [`Encoded`] and back
//! - [`to_json`] / [`from_json`] - the same, through the JSON transport
//!
//! Every operation has a `_with` variant taking a [`Config`]. Function
//! records are refused unless [`Config::allow_functions`] is set.

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

// Re-export the value model and record format
pub use marrow_core::{
    is_native_constructor, is_native_prototype, Builtin, Encoded, Heap, Literal, Node, NodeId,
    NodeKind, Property, Prototype, Record, RecordSequence, RecordType, RegExp, RegExpFlags, Slot,
    Source, Value, CONSTRUCTOR_KEY, PROTOTYPE_KEY,
};

// Re-export the engine and the transport
pub use marrow_engine::{Config, Dehydrator, Hydrator};
pub use marrow_wire::{decode_json, encode_json, DecodeError};

use tracing::debug;

/// Serialize the graph reachable from `value`.
pub fn serialize(heap: &Heap, value: &Value) -> Result<Encoded> {
    serialize_with(heap, value, &Config::default())
}

/// Serialize the graph reachable from `value` with explicit options.
pub fn serialize_with(heap: &Heap, value: &Value, config: &Config) -> Result<Encoded> {
    Ok(marrow_engine::serialize_with(heap, value, config)?)
}

/// Rebuild an encoded value onto `heap`.
pub fn deserialize(heap: &mut Heap, encoded: &Encoded) -> Result<Value> {
    deserialize_with(heap, encoded, &Config::default())
}

/// Rebuild an encoded value onto `heap` with explicit options.
///
/// On error no nodes are left behind on the heap.
pub fn deserialize_with(heap: &mut Heap, encoded: &Encoded, config: &Config) -> Result<Value> {
    Ok(marrow_engine::deserialize_with(heap, encoded, config)?)
}

/// Serialize the graph reachable from `value` to JSON text.
pub fn to_json(heap: &Heap, value: &Value) -> Result<String> {
    to_json_with(heap, value, &Config::default())
}

/// Serialize to JSON text with explicit options.
pub fn to_json_with(heap: &Heap, value: &Value, config: &Config) -> Result<String> {
    let encoded = serialize_with(heap, value, config)?;
    let json = encode_json(&encoded);
    debug!(bytes = json.len(), "encoded JSON");
    Ok(json)
}

/// Rebuild a value from JSON text onto `heap`.
pub fn from_json(heap: &mut Heap, json: &str) -> Result<Value> {
    from_json_with(heap, json, &Config::default())
}

/// Rebuild a value from JSON text with explicit options.
pub fn from_json_with(heap: &mut Heap, json: &str, config: &Config) -> Result<Value> {
    debug!(bytes = json.len(), "decoding JSON");
    let encoded = decode_json(json)?;
    deserialize_with(heap, &encoded, config)
}
