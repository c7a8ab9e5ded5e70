//! Builtin registry
//!
//! The fixed set of intrinsic constructors, each paired with its prototype.
//! A node whose prototype is one of these needs no prototype reference in its
//! record, and an own `constructor` property holding one of these constructors
//! is not recorded either.
//!
//! | Builtin | Default prototype of |
//! |---------|----------------------|
//! | Object | plain objects, host objects |
//! | Function | functions |
//! | Array | arrays |
//! | Set | sets |
//! | Map | maps |
//! | Symbol | symbols |
//! | RegExp | regular expressions |
//!
//! The registry is a `const` table: it is read-only for the life of the
//! process and needs no synchronization.

use crate::heap::{NodeKind, Prototype};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// The seven intrinsic constructors
///
/// ## Invariant
///
/// Each variant names both a constructor and that constructor's prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Builtin {
    /// `Object` and `Object.prototype`
    Object,
    /// `Function` and `Function.prototype`
    Function,
    /// `Array` and `Array.prototype`
    Array,
    /// `Set` and `Set.prototype`
    Set,
    /// `Map` and `Map.prototype`
    Map,
    /// `Symbol` and `Symbol.prototype`
    Symbol,
    /// `RegExp` and `RegExp.prototype`
    RegExp,
}

impl Builtin {
    /// All builtins (for iteration)
    pub const ALL: [Builtin; 7] = [
        Builtin::Object,
        Builtin::Function,
        Builtin::Array,
        Builtin::Set,
        Builtin::Map,
        Builtin::Symbol,
        Builtin::RegExp,
    ];

    /// Constructor name
    pub const fn name(&self) -> &'static str {
        match self {
            Builtin::Object => "Object",
            Builtin::Function => "Function",
            Builtin::Array => "Array",
            Builtin::Set => "Set",
            Builtin::Map => "Map",
            Builtin::Symbol => "Symbol",
            Builtin::RegExp => "RegExp",
        }
    }

    /// Parse from constructor name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// The builtin whose prototype a freshly created node of `kind` gets
    pub fn for_kind(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Object | NodeKind::Host { .. } => Builtin::Object,
            NodeKind::Array(_) => Builtin::Array,
            NodeKind::Set(_) => Builtin::Set,
            NodeKind::Map(_) => Builtin::Map,
            NodeKind::Function { .. } => Builtin::Function,
            NodeKind::Symbol { .. } => Builtin::Symbol,
            NodeKind::RegExp(_) => Builtin::RegExp,
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Is this prototype one of the registered builtin prototypes?
///
/// `Null` and node prototypes are not native.
pub fn is_native_prototype(proto: &Prototype) -> bool {
    matches!(proto, Prototype::Builtin(b) if Builtin::ALL.contains(b))
}

/// Is this value one of the registered builtin constructors?
pub fn is_native_constructor(value: &Value) -> bool {
    matches!(value, Value::Builtin(b) if Builtin::ALL.contains(b))
}
