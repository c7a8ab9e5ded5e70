//! Serialization engine for Marrow
//!
//! Converts between a value graph living in a [`Heap`] and its flat
//! [`Encoded`] form:
//! - [`serialize`] walks the graph and emits one record per reachable node
//! - [`deserialize`] allocates the graph back onto a heap in two passes
//!
//! Cycles and shared nodes survive the round trip: every node is emitted
//! once and every other occurrence becomes a reference to its index.

#![warn(missing_docs)]

pub mod config;
pub mod dehydrate;
pub mod hydrate;

pub use config::Config;
pub use dehydrate::Dehydrator;
pub use hydrate::Hydrator;

use marrow_core::{Encoded, Heap, Result, Value};

/// Serialize the graph reachable from `value` with default options.
pub fn serialize(heap: &Heap, value: &Value) -> Result<Encoded> {
    serialize_with(heap, value, &Config::default())
}

/// Serialize the graph reachable from `value`.
pub fn serialize_with(heap: &Heap, value: &Value, config: &Config) -> Result<Encoded> {
    Dehydrator::new(heap, config).dehydrate(value)
}

/// Reconstruct an encoded value onto `heap` with default options.
pub fn deserialize(heap: &mut Heap, encoded: &Encoded) -> Result<Value> {
    deserialize_with(heap, encoded, &Config::default())
}

/// Reconstruct an encoded value onto `heap`.
///
/// On error the heap is left exactly as it was.
pub fn deserialize_with(heap: &mut Heap, encoded: &Encoded, config: &Config) -> Result<Value> {
    Hydrator::new(heap, config).hydrate(encoded)
}
