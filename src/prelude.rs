//! Convenient imports for Marrow.
//!
//! ```
//! use marrow::prelude::*;
//!
//! let mut heap = Heap::new();
//! let obj = heap.alloc_object();
//! heap.set(obj, "self", Value::Node(obj)).unwrap();
//!
//! let json = to_json(&heap, &Value::Node(obj)).unwrap();
//! let copy = from_json(&mut heap, &json).unwrap();
//! assert!(heap.structurally_equal(&Value::Node(obj), &heap, &copy));
//! ```

// Entry points
pub use crate::{deserialize, from_json, serialize, to_json, Config};

// Error handling
pub use crate::error::{Error, Result};

// Value model
pub use marrow_core::{Heap, NodeId, NodeKind, Prototype, RegExp, Value};
