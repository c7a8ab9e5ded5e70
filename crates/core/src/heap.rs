//! Arena heap of object-like nodes
//!
//! Every object-like value lives in a [`Heap`] and is addressed by a stable
//! [`NodeId`] handle. Handles are plain integers, so identity-keyed maps,
//! cycles and shared references need no reference counting: a cycle is just a
//! node whose property holds its own handle.
//!
//! ## Node anatomy
//!
//! - `kind`: the intrinsic content (array elements, set members, map entries,
//!   function source, symbol description, regexp pattern)
//! - `prototype`: a builtin prototype, `null`, or another node
//! - `properties`: own string-keyed properties, each with an enumerable bit
//!
//! ## Rollback
//!
//! [`Heap::checkpoint`] and [`Heap::rollback`] discard every node allocated
//! after the checkpoint. This is only sound when no node older than the
//! checkpoint was made to point at a newer one, which holds for the hydrator:
//! it only ever mutates shells it allocated itself.

use crate::builtins::Builtin;
use crate::error::{Error, Result};
use crate::regexp::RegExp;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque handle referencing a node on a [`Heap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the node in its heap
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An own property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property value
    pub value: Value,
    /// Whether the property shows up in key enumeration
    pub enumerable: bool,
}

impl Property {
    /// An enumerable property
    pub fn enumerable(value: Value) -> Self {
        Self {
            value,
            enumerable: true,
        }
    }

    /// A non-enumerable property
    pub fn hidden(value: Value) -> Self {
        Self {
            value,
            enumerable: false,
        }
    }
}

/// The prototype slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prototype {
    /// One of the registered builtin prototypes
    Builtin(Builtin),
    /// No prototype
    Null,
    /// A node on the same heap
    Node(NodeId),
}

/// Intrinsic content of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Plain object, no intrinsic content
    Object,
    /// Ordered, indexable sequence
    Array(Vec<Value>),
    /// Insertion-ordered set, members unique under SameValueZero
    Set(Vec<Value>),
    /// Insertion-ordered map, keys unique under SameValueZero
    Map(Vec<(Value, Value)>),
    /// Function, carried as its source text
    Function {
        /// Source text
        source: String,
    },
    /// Symbol; every symbol node is a distinct identity
    Symbol {
        /// Description given at construction (`None` for `Symbol()`)
        description: Option<String>,
    },
    /// Regular expression
    RegExp(RegExp),
    /// Host object the engine has no encoding for (dates, errors, promises,
    /// typed buffers, ...)
    Host {
        /// Host class name
        class: String,
    },
}

impl NodeKind {
    /// Kind name (for error messages)
    pub fn name(&self) -> String {
        match self {
            NodeKind::Object => "Object".to_string(),
            NodeKind::Array(_) => "Array".to_string(),
            NodeKind::Set(_) => "Set".to_string(),
            NodeKind::Map(_) => "Map".to_string(),
            NodeKind::Function { .. } => "Function".to_string(),
            NodeKind::Symbol { .. } => "Symbol".to_string(),
            NodeKind::RegExp(_) => "RegExp".to_string(),
            NodeKind::Host { class } => format!("Host({})", class),
        }
    }
}

/// A node: kind, prototype and own properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Intrinsic content
    pub kind: NodeKind,
    /// Prototype slot
    pub prototype: Prototype,
    /// Own properties, keyed by name
    pub properties: BTreeMap<String, Property>,
}

impl Node {
    /// Create a node with the default builtin prototype for its kind
    pub fn new(kind: NodeKind) -> Self {
        let prototype = Prototype::Builtin(Builtin::for_kind(&kind));
        Self {
            kind,
            prototype,
            properties: BTreeMap::new(),
        }
    }

    /// Names of own enumerable properties, in key order
    pub fn enumerable_keys(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, _)| k.as_str())
    }
}

/// Handle for the node stored at position `len`.
fn next_id(len: usize) -> Result<NodeId> {
    u32::try_from(len)
        .map(NodeId)
        .map_err(|_| Error::HeapFull { len })
}

/// Marker returned by [`Heap::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Arena owning every node.
#[derive(Debug, Clone, Default)]
pub struct Heap {
    nodes: Vec<Node>,
}

impl Heap {
    /// Create an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the heap empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- allocation ---------------------------------------------------------

    /// Allocate a node with the default prototype for its kind
    ///
    /// # Panics
    ///
    /// Panics once every `u32` handle is taken. Use [`Heap::try_alloc`] where
    /// running out of handles must surface as an error.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        match self.try_alloc(kind) {
            Ok(id) => id,
            Err(e) => panic!("{}", e),
        }
    }

    /// Allocate a node, failing with [`Error::HeapFull`] once every `u32`
    /// handle is taken
    pub fn try_alloc(&mut self, kind: NodeKind) -> Result<NodeId> {
        let id = next_id(self.nodes.len())?;
        self.nodes.push(Node::new(kind));
        Ok(id)
    }

    /// Allocate a plain object
    pub fn alloc_object(&mut self) -> NodeId {
        self.alloc(NodeKind::Object)
    }

    /// Allocate a plain object with an explicit prototype
    pub fn create(&mut self, prototype: Prototype) -> NodeId {
        let id = self.alloc_object();
        self.nodes[id.index()].prototype = prototype;
        id
    }

    /// Allocate an array holding `elements`
    pub fn alloc_array(&mut self, elements: Vec<Value>) -> NodeId {
        self.alloc(NodeKind::Array(elements))
    }

    /// Allocate a set; duplicate members are dropped
    pub fn alloc_set(&mut self, members: impl IntoIterator<Item = Value>) -> NodeId {
        let mut unique: Vec<Value> = Vec::new();
        for m in members {
            if !unique.iter().any(|u| u.same_value_zero(&m)) {
                unique.push(m);
            }
        }
        self.alloc(NodeKind::Set(unique))
    }

    /// Allocate a map; later duplicates overwrite earlier values in place
    pub fn alloc_map(&mut self, entries: impl IntoIterator<Item = (Value, Value)>) -> NodeId {
        let mut unique: Vec<(Value, Value)> = Vec::new();
        for (k, v) in entries {
            match unique.iter_mut().find(|(uk, _)| uk.same_value_zero(&k)) {
                Some(slot) => slot.1 = v,
                None => unique.push((k, v)),
            }
        }
        self.alloc(NodeKind::Map(unique))
    }

    /// Allocate a function from its source text
    pub fn alloc_function(&mut self, source: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Function {
            source: source.into(),
        })
    }

    /// Allocate a fresh symbol
    pub fn alloc_symbol(&mut self, description: Option<&str>) -> NodeId {
        self.alloc(NodeKind::Symbol {
            description: description.map(str::to_string),
        })
    }

    /// Allocate a regular expression
    pub fn alloc_regexp(&mut self, regexp: RegExp) -> NodeId {
        self.alloc(NodeKind::RegExp(regexp))
    }

    /// Allocate an opaque host object
    pub fn alloc_host(&mut self, class: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Host {
            class: class.into(),
        })
    }

    // -- access -------------------------------------------------------------

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(Error::NodeNotFound(id))
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(Error::NodeNotFound(id))
    }

    /// Kind of a node
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.get(id)?.kind)
    }

    // -- properties ---------------------------------------------------------

    /// Assign a property. A new property is enumerable; an existing one keeps
    /// its enumerable bit.
    pub fn set(&mut self, id: NodeId, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        let node = self.get_mut(id)?;
        match node.properties.get_mut(&key) {
            Some(existing) => existing.value = value,
            None => {
                node.properties.insert(key, Property::enumerable(value));
            }
        }
        Ok(())
    }

    /// Define a property with explicit enumerability
    pub fn define(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: Value,
        enumerable: bool,
    ) -> Result<()> {
        let node = self.get_mut(id)?;
        node.properties
            .insert(key.into(), Property { value, enumerable });
        Ok(())
    }

    /// Read an own property
    pub fn property(&self, id: NodeId, key: &str) -> Result<Option<&Value>> {
        Ok(self.get(id)?.properties.get(key).map(|p| &p.value))
    }

    /// Names of own enumerable properties
    pub fn enumerable_keys(&self, id: NodeId) -> Result<Vec<String>> {
        Ok(self.get(id)?.enumerable_keys().map(str::to_string).collect())
    }

    // -- prototype ----------------------------------------------------------

    /// Prototype of a node
    pub fn prototype_of(&self, id: NodeId) -> Result<Prototype> {
        Ok(self.get(id)?.prototype)
    }

    /// Does the prototype chain starting at `start` pass through `target`?
    /// `start` itself counts.
    pub fn chain_contains(&self, start: NodeId, target: NodeId) -> Result<bool> {
        let mut current = start;
        for _ in 0..=self.nodes.len() {
            if current == target {
                return Ok(true);
            }
            match self.prototype_of(current)? {
                Prototype::Node(next) => current = next,
                Prototype::Builtin(_) | Prototype::Null => return Ok(false),
            }
        }
        // longer than the heap: the chain already loops without `target`
        Ok(false)
    }

    /// Replace the prototype of a node
    pub fn set_prototype(&mut self, id: NodeId, prototype: Prototype) -> Result<()> {
        self.get_mut(id)?.prototype = prototype;
        Ok(())
    }

    // -- collections --------------------------------------------------------

    /// Append to an array
    pub fn push(&mut self, id: NodeId, value: Value) -> Result<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(wrong_kind("Array", other)),
        }
    }

    /// Add a member to a set; returns false if it was already present
    pub fn add(&mut self, id: NodeId, value: Value) -> Result<bool> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Set(members) => {
                if members.iter().any(|m| m.same_value_zero(&value)) {
                    Ok(false)
                } else {
                    members.push(value);
                    Ok(true)
                }
            }
            other => Err(wrong_kind("Set", other)),
        }
    }

    /// Insert a map entry; an existing key keeps its position
    pub fn insert(&mut self, id: NodeId, key: Value, value: Value) -> Result<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Map(entries) => {
                match entries.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
                    Some(slot) => slot.1 = value,
                    None => entries.push((key, value)),
                }
                Ok(())
            }
            other => Err(wrong_kind("Map", other)),
        }
    }

    /// Elements of an array or members of a set
    pub fn elements(&self, id: NodeId) -> Result<&[Value]> {
        match &self.get(id)?.kind {
            NodeKind::Array(items) | NodeKind::Set(items) => Ok(items),
            other => Err(wrong_kind("Array or Set", other)),
        }
    }

    /// Entries of a map
    pub fn entries(&self, id: NodeId) -> Result<&[(Value, Value)]> {
        match &self.get(id)?.kind {
            NodeKind::Map(entries) => Ok(entries),
            other => Err(wrong_kind("Map", other)),
        }
    }

    /// Look up a map key
    pub fn lookup(&self, id: NodeId, key: &Value) -> Result<Option<&Value>> {
        Ok(self
            .entries(id)?
            .iter()
            .find(|(k, _)| k.same_value_zero(key))
            .map(|(_, v)| v))
    }

    // -- rollback -----------------------------------------------------------

    /// Mark the current allocation point
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.nodes.len())
    }

    /// Drop every node allocated after `mark`
    pub fn rollback(&mut self, mark: Checkpoint) {
        self.nodes.truncate(mark.0);
    }

    // -- comparison ---------------------------------------------------------

    /// Structural equality of `a` (on this heap) and `b` (on `other`).
    ///
    /// Nodes are matched one-to-one: the comparison fails if a node on one
    /// side would have to correspond to two different nodes on the other.
    /// Cycles and sharing must therefore have the same shape on both sides.
    /// Primitives compare with SameValueZero.
    pub fn structurally_equal(&self, a: &Value, other: &Heap, b: &Value) -> bool {
        let mut forward: HashMap<NodeId, NodeId> = HashMap::new();
        let mut backward: HashMap<NodeId, NodeId> = HashMap::new();
        let mut pending: Vec<(Value, Value)> = vec![(a.clone(), b.clone())];

        while let Some((left, right)) = pending.pop() {
            let (l, r) = match (&left, &right) {
                (Value::Node(l), Value::Node(r)) => (*l, *r),
                (Value::Node(_), _) | (_, Value::Node(_)) => return false,
                _ => {
                    if !left.same_value_zero(&right) {
                        return false;
                    }
                    continue;
                }
            };

            match (forward.get(&l), backward.get(&r)) {
                (Some(seen_r), _) if *seen_r != r => return false,
                (_, Some(seen_l)) if *seen_l != l => return false,
                (Some(_), _) => continue,
                _ => {}
            }
            forward.insert(l, r);
            backward.insert(r, l);

            let (ln, rn) = match (self.get(l), other.get(r)) {
                (Ok(ln), Ok(rn)) => (ln, rn),
                _ => return false,
            };

            match (&ln.kind, &rn.kind) {
                (NodeKind::Object, NodeKind::Object) => {}
                (NodeKind::Array(x), NodeKind::Array(y)) | (NodeKind::Set(x), NodeKind::Set(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(x.iter().cloned().zip(y.iter().cloned()));
                }
                (NodeKind::Map(x), NodeKind::Map(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    for ((xk, xv), (yk, yv)) in x.iter().zip(y) {
                        pending.push((xk.clone(), yk.clone()));
                        pending.push((xv.clone(), yv.clone()));
                    }
                }
                (NodeKind::Function { source: x }, NodeKind::Function { source: y }) => {
                    if x != y {
                        return false;
                    }
                }
                (NodeKind::Symbol { description: x }, NodeKind::Symbol { description: y }) => {
                    if x != y {
                        return false;
                    }
                }
                (NodeKind::RegExp(x), NodeKind::RegExp(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (NodeKind::Host { class: x }, NodeKind::Host { class: y }) => {
                    if x != y {
                        return false;
                    }
                }
                _ => return false,
            }

            match (ln.prototype, rn.prototype) {
                (Prototype::Node(x), Prototype::Node(y)) => {
                    pending.push((Value::Node(x), Value::Node(y)));
                }
                (x, y) if x == y => {}
                _ => return false,
            }

            if ln.properties.len() != rn.properties.len() {
                return false;
            }
            for ((lk, lp), (rk, rp)) in ln.properties.iter().zip(&rn.properties) {
                if lk != rk || lp.enumerable != rp.enumerable {
                    return false;
                }
                pending.push((lp.value.clone(), rp.value.clone()));
            }
        }

        true
    }
}

fn wrong_kind(expected: &'static str, actual: &NodeKind) -> Error {
    Error::WrongKind {
        expected,
        actual: actual.name(),
    }
}
