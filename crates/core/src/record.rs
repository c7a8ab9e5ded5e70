//! Record format
//!
//! The flat, linear form a value graph is dehydrated into. One [`Record`] per
//! node; position in the [`RecordSequence`] is identity.
//!
//! ## Record anatomy
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `record_type` | which shell to allocate on hydration |
//! | `source` | intrinsic content, shape fixed by the type |
//! | `keys` | own enumerable properties plus reserved keys |
//!
//! Every value position is a [`Slot`]: a primitive literal, or a reference to
//! another record by index. References are the only way a record points at a
//! node, so sharing and cycles are expressed purely by repeated indices and
//! the sequence itself is never cyclic.
//!
//! ## Per-type source
//!
//! | Type | Source |
//! |------|--------|
//! | Object | `None` |
//! | Array | `Elements`, index aligned |
//! | Set | `Elements`, insertion order |
//! | Map | `Entries`, insertion order |
//! | Function | `Text` |
//! | Symbol | `Description` |
//! | RegExp | `Pattern` |

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved key carrying a non-builtin prototype.
pub const PROTOTYPE_KEY: &str = "__proto__";

/// Reserved key carrying a non-builtin own constructor.
pub const CONSTRUCTOR_KEY: &str = "constructor";

/// The closed set of record types
///
/// Adding a variant forces both classification in the dehydrator and shell
/// allocation in the hydrator to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Plain object
    Object,
    /// Ordered sequence
    Array,
    /// Ordered set
    Set,
    /// Ordered key-value collection
    Map,
    /// Function
    Function,
    /// Symbol
    Symbol,
    /// Regular expression
    RegExp,
}

impl RecordType {
    /// All record types (for iteration)
    pub const ALL: [RecordType; 7] = [
        RecordType::Object,
        RecordType::Array,
        RecordType::Set,
        RecordType::Map,
        RecordType::Function,
        RecordType::Symbol,
        RecordType::RegExp,
    ];

    /// Type tag used on the wire
    pub const fn name(&self) -> &'static str {
        match self {
            RecordType::Object => "Object",
            RecordType::Array => "Array",
            RecordType::Set => "Set",
            RecordType::Map => "Map",
            RecordType::Function => "Function",
            RecordType::Symbol => "Symbol",
            RecordType::RegExp => "RegExp",
        }
    }

    /// Parse from wire tag
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive inlined into a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Absence of a value
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    String(String),
}

impl Literal {
    /// Literal form of a primitive value; `None` for nodes and builtins
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Undefined => Some(Literal::Undefined),
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Int(i) => Some(Literal::Int(*i)),
            Value::Float(f) => Some(Literal::Float(*f)),
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Node(_) | Value::Builtin(_) => None,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(i) => Value::Int(i),
            Literal::Float(f) => Value::Float(f),
            Literal::String(s) => Value::String(s),
        }
    }
}

/// A value position inside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    /// Reference to the record at this index
    Ref(usize),
    /// Inlined primitive
    Literal(Literal),
}

impl Slot {
    /// Referenced index, if this is a reference
    pub fn as_ref_index(&self) -> Option<usize> {
        match self {
            Slot::Ref(i) => Some(*i),
            Slot::Literal(_) => None,
        }
    }
}

impl From<Literal> for Slot {
    fn from(literal: Literal) -> Self {
        Slot::Literal(literal)
    }
}

/// Type-dependent intrinsic payload of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// Objects carry no source
    None,
    /// Array elements or set members
    Elements(Vec<Slot>),
    /// Map entries
    Entries(Vec<(Slot, Slot)>),
    /// Regular expression pattern and flag string
    Pattern {
        /// Pattern text
        pattern: String,
        /// Concatenated flag characters
        flags: String,
    },
    /// Function source text
    Text(String),
    /// Symbol description
    Description(Option<String>),
}

impl Source {
    /// Does this shape belong to `record_type`?
    pub fn fits(&self, record_type: RecordType) -> bool {
        matches!(
            (record_type, self),
            (RecordType::Object, Source::None)
                | (RecordType::Array, Source::Elements(_))
                | (RecordType::Set, Source::Elements(_))
                | (RecordType::Map, Source::Entries(_))
                | (RecordType::Function, Source::Text(_))
                | (RecordType::Symbol, Source::Description(_))
                | (RecordType::RegExp, Source::Pattern { .. })
        )
    }
}

/// Flat form of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record type
    pub record_type: RecordType,
    /// Intrinsic content
    pub source: Source,
    /// Own enumerable properties and reserved keys
    pub keys: BTreeMap<String, Slot>,
}

impl Record {
    /// Create a record with no keys
    pub fn new(record_type: RecordType, source: Source) -> Self {
        Self {
            record_type,
            source,
            keys: BTreeMap::new(),
        }
    }

    /// Add a key (builder style)
    pub fn with_key(mut self, key: impl Into<String>, slot: Slot) -> Self {
        self.keys.insert(key.into(), slot);
        self
    }

    /// Every slot in the record: source slots first, then key slots
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        let source: Box<dyn Iterator<Item = &Slot> + '_> = match &self.source {
            Source::Elements(items) => Box::new(items.iter()),
            Source::Entries(entries) => Box::new(entries.iter().flat_map(|(k, v)| [k, v])),
            _ => Box::new(std::iter::empty()),
        };
        source.chain(self.keys.values())
    }
}

/// Ordered list of records; index 0 is the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSequence(Vec<Record>);

impl RecordSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning its index
    pub fn push(&mut self, record: Record) -> usize {
        self.0.push(record);
        self.0.len() - 1
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is the sequence empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.0.get(index)
    }

    /// Root record
    pub fn root(&self) -> Option<&Record> {
        self.0.first()
    }

    /// Iterate records in order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    /// Every reference index in the sequence, in record order
    pub fn references(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .flat_map(|r| r.slots())
            .filter_map(Slot::as_ref_index)
    }
}

impl From<Vec<Record>> for RecordSequence {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a RecordSequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of serialization: an inlined primitive root, or a record sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Encoded {
    /// Primitive root, passed through unchanged
    Inline(Literal),
    /// Object-like root
    Records(RecordSequence),
}

impl Encoded {
    /// Is this a passed-through primitive?
    pub fn is_inline(&self) -> bool {
        matches!(self, Encoded::Inline(_))
    }

    /// Borrow the record sequence, if any
    pub fn as_records(&self) -> Option<&RecordSequence> {
        match self {
            Encoded::Records(records) => Some(records),
            Encoded::Inline(_) => None,
        }
    }
}

impl From<Literal> for Encoded {
    fn from(literal: Literal) -> Self {
        Encoded::Inline(literal)
    }
}

impl From<RecordSequence> for Encoded {
    fn from(records: RecordSequence) -> Self {
        Encoded::Records(records)
    }
}
