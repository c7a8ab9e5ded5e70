//! Value types for Marrow
//!
//! This module defines the `Value` type every heap slot holds: element
//! positions of arrays and sets, map keys and values, and property values.
//!
//! ## The Eight Variants
//!
//! 1. `Undefined` - absence of a value
//! 2. `Null` - explicit null
//! 3. `Bool` - boolean true or false
//! 4. `Int` - 64-bit signed integer
//! 5. `Float` - 64-bit IEEE-754 floating point
//! 6. `String` - UTF-8 encoded string
//! 7. `Node` - handle to an object-like node on a [`Heap`](crate::Heap)
//! 8. `Builtin` - one of the process-wide intrinsic constructors
//!
//! The first six are primitives: they are copied wherever they occur and never
//! receive a record of their own. `Node` values carry identity, so two `Node`
//! values are the same object exactly when their handles are equal.

use crate::builtins::Builtin;
use crate::heap::NodeId;
use serde::{Deserialize, Serialize};

/// A value stored in a heap slot.
///
/// ## Equality Rules
///
/// - Different variants are NEVER equal (`Int(1) != Float(1.0)`)
/// - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
/// - `Node` compares handles, which is reference equality
///
/// Collections use [`Value::same_value_zero`] instead, under which `NaN`
/// equals itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absence of a value
    Undefined,

    /// Explicit null
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    /// Supports: NaN, +Inf, -Inf, -0.0, subnormals
    Float(f64),

    /// UTF-8 encoded string
    String(String),

    /// Handle to an object-like node
    Node(NodeId),

    /// Intrinsic constructor (e.g. the `Map` constructor)
    Builtin(Builtin),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Node(_) => "Node",
            Value::Builtin(_) => "Builtin",
        }
    }

    /// Check if this value is a primitive (inlined, never given a record)
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Node(_) | Value::Builtin(_))
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the node handle
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// SameValueZero comparison, used for set membership and map keys.
    ///
    /// Identical to `==` except that `NaN` equals `NaN`.
    pub fn same_value_zero(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            _ => self == other,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}
