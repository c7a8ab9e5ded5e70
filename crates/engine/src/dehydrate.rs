//! Dehydration: value graph to record sequence
//!
//! ## Algorithm
//!
//! 1. A primitive is returned unchanged; inside records it becomes a literal
//!    slot.
//! 2. A node already in the identity cache becomes a reference to its index.
//! 3. A new node is assigned the next index and entered into the cache
//!    *before* any of its children are looked at, then queued.
//! 4. Queued nodes are turned into records in FIFO order. Indices are handed
//!    out in discovery order, so records land in the sequence at exactly the
//!    index their references already point to.
//!
//! Step 3 is what makes cycles terminate: by the time a node's children are
//! visited, any path back to the node finds it in the cache. The worklist
//! replaces recursion, so graph depth is bounded by memory, not stack.

use crate::config::Config;
use marrow_core::{
    is_native_constructor, is_native_prototype, Encoded, Error, Heap, Literal, NodeId, NodeKind,
    Prototype, Record, RecordSequence, RecordType, Result, Slot, Source, Value, CONSTRUCTOR_KEY,
    PROTOTYPE_KEY,
};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, trace};

/// Single-use walker that linearizes one value graph.
pub struct Dehydrator<'a> {
    heap: &'a Heap,
    config: &'a Config,
    /// node -> index in the output sequence
    cache: FxHashMap<NodeId, usize>,
    /// discovered nodes whose records are not built yet
    pending: VecDeque<NodeId>,
    records: RecordSequence,
}

impl<'a> Dehydrator<'a> {
    /// Create a dehydrator reading from `heap`
    pub fn new(heap: &'a Heap, config: &'a Config) -> Self {
        Self {
            heap,
            config,
            cache: FxHashMap::default(),
            pending: VecDeque::new(),
            records: RecordSequence::new(),
        }
    }

    /// Linearize the graph reachable from `root`.
    pub fn dehydrate(mut self, root: &Value) -> Result<Encoded> {
        if let Some(literal) = Literal::from_value(root) {
            return Ok(Encoded::Inline(literal));
        }

        self.slot(root)?;
        while let Some(id) = self.pending.pop_front() {
            let record = self.record_for(id)?;
            trace!(node = %id, record_type = %record.record_type, "dehydrated node");
            let index = self.records.push(record);
            debug_assert_eq!(self.cache.get(&id), Some(&index));
        }

        debug!(records = self.records.len(), "serialized value graph");
        Ok(Encoded::Records(self.records))
    }

    /// Index for `id`, reserving the next one on first sight.
    fn reference(&mut self, id: NodeId) -> usize {
        if let Some(&index) = self.cache.get(&id) {
            return index;
        }
        let index = self.cache.len();
        self.cache.insert(id, index);
        self.pending.push_back(id);
        index
    }

    fn slot(&mut self, value: &Value) -> Result<Slot> {
        if let Some(literal) = Literal::from_value(value) {
            return Ok(Slot::Literal(literal));
        }
        match value {
            Value::Node(id) => Ok(Slot::Ref(self.reference(*id))),
            Value::Builtin(b) => Err(Error::Unsupported {
                what: format!("builtin constructor {} outside a constructor slot", b),
            }),
            other => Err(Error::Unsupported {
                what: other.type_name().to_string(),
            }),
        }
    }

    fn slots(&mut self, values: &[Value]) -> Result<Vec<Slot>> {
        values.iter().map(|v| self.slot(v)).collect()
    }

    fn record_for(&mut self, id: NodeId) -> Result<Record> {
        let heap = self.heap;
        let node = heap.get(id)?;

        let (record_type, source) = match &node.kind {
            NodeKind::Symbol { description } => {
                (RecordType::Symbol, Source::Description(description.clone()))
            }
            NodeKind::Function { source } => {
                if !self.config.allow_functions {
                    return Err(Error::FunctionsDisabled);
                }
                (RecordType::Function, Source::Text(source.clone()))
            }
            NodeKind::Set(members) => (RecordType::Set, Source::Elements(self.slots(members)?)),
            NodeKind::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (k, v) in entries {
                    pairs.push((self.slot(k)?, self.slot(v)?));
                }
                (RecordType::Map, Source::Entries(pairs))
            }
            NodeKind::Array(items) => (RecordType::Array, Source::Elements(self.slots(items)?)),
            NodeKind::RegExp(re) => (
                RecordType::RegExp,
                Source::Pattern {
                    pattern: re.pattern.clone(),
                    flags: re.flags.to_flag_string(),
                },
            ),
            NodeKind::Object => (RecordType::Object, Source::None),
            NodeKind::Host { class } => {
                return Err(Error::Unsupported {
                    what: format!("host object {}", class),
                })
            }
        };

        let mut keys = BTreeMap::new();

        if !is_native_prototype(&node.prototype) {
            let slot = match node.prototype {
                Prototype::Node(proto) => Slot::Ref(self.reference(proto)),
                _ => Slot::Literal(Literal::Null),
            };
            keys.insert(PROTOTYPE_KEY.to_string(), slot);
        }

        // A hidden native constructor is the prototype's own default slot.
        // Anything else goes through `slot`, which refuses builtins.
        if let Some(ctor) = node.properties.get(CONSTRUCTOR_KEY) {
            if ctor.enumerable || !is_native_constructor(&ctor.value) {
                keys.insert(CONSTRUCTOR_KEY.to_string(), self.slot(&ctor.value)?);
            }
        }

        for (key, prop) in &node.properties {
            if !prop.enumerable || key == CONSTRUCTOR_KEY {
                continue;
            }
            if key == PROTOTYPE_KEY {
                return Err(Error::ReservedKey { key: key.clone() });
            }
            keys.insert(key.clone(), self.slot(&prop.value)?);
        }

        Ok(Record {
            record_type,
            source,
            keys,
        })
    }
}
