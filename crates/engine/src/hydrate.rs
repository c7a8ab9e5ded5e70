//! Hydration: record sequence to value graph
//!
//! ## Two passes
//!
//! - Pass 1 allocates one empty, correctly typed shell per record and builds
//!   the index -> shell table. Symbols, functions and regular expressions
//!   carry no references in their source, so they are complete after this
//!   pass.
//! - Pass 2 fills each shell: source elements and entries first, then keys.
//!   Every reference resolves against the table from pass 1, so a record may
//!   point forwards or backwards in the sequence.
//!
//! ## All or nothing
//!
//! The heap is checkpointed before pass 1. Any error rolls the heap back to
//! that checkpoint, so a failed call leaves no partially built nodes behind.

use crate::config::Config;
use marrow_core::{
    Encoded, Error, Heap, NodeId, NodeKind, Prototype, Record, RecordSequence, RecordType, RegExp, Result,
    Slot, Source, Value, CONSTRUCTOR_KEY, PROTOTYPE_KEY,
};
use tracing::{debug, trace, warn};

/// Single-use builder that reconstructs one value graph onto a heap.
pub struct Hydrator<'a> {
    heap: &'a mut Heap,
    config: &'a Config,
}

impl<'a> Hydrator<'a> {
    /// Create a hydrator allocating into `heap`
    pub fn new(heap: &'a mut Heap, config: &'a Config) -> Self {
        Self { heap, config }
    }

    /// Reconstruct an encoded value. Inline primitives pass through.
    pub fn hydrate(self, encoded: &Encoded) -> Result<Value> {
        match encoded {
            Encoded::Inline(literal) => Ok(literal.clone().into()),
            Encoded::Records(records) => self.hydrate_records(records),
        }
    }

    /// Reconstruct the graph described by `records`, returning the root.
    pub fn hydrate_records(mut self, records: &RecordSequence) -> Result<Value> {
        if records.is_empty() {
            return Err(Error::EmptySequence);
        }
        if let Some(limit) = self.config.max_records {
            if records.len() > limit {
                return Err(Error::LimitExceeded {
                    limit,
                    actual: records.len(),
                });
            }
        }

        let mark = self.heap.checkpoint();
        match self.build(records) {
            Ok(root) => {
                debug!(records = records.len(), "deserialized value graph");
                Ok(root)
            }
            Err(e) => {
                self.heap.rollback(mark);
                debug!(error = %e, "deserialization failed, heap rolled back");
                Err(e)
            }
        }
    }

    fn build(&mut self, records: &RecordSequence) -> Result<Value> {
        let refs = self.allocate(records)?;
        for (index, (record, &shell)) in records.iter().zip(&refs).enumerate() {
            self.populate(index, shell, record, &refs)?;
            trace!(index, node = %shell, "populated shell");
        }
        Ok(Value::Node(refs[0]))
    }

    /// Pass 1: one shell per record.
    fn allocate(&mut self, records: &RecordSequence) -> Result<Vec<NodeId>> {
        let mut refs = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let record_type = record.record_type;
            let mismatch = || Error::SourceMismatch { index, record_type };

            let shell = match record_type {
                RecordType::Symbol => {
                    let Source::Description(description) = &record.source else {
                        return Err(mismatch());
                    };
                    self.heap.try_alloc(NodeKind::Symbol {
                        description: description.clone(),
                    })?
                }
                RecordType::Function => {
                    let Source::Text(text) = &record.source else {
                        return Err(mismatch());
                    };
                    if !self.config.allow_functions {
                        return Err(Error::FunctionsDisabled);
                    }
                    warn!(index, "hydrating function record from source text");
                    self.heap.try_alloc(NodeKind::Function {
                        source: text.clone(),
                    })?
                }
                RecordType::Set => {
                    let Source::Elements(_) = &record.source else {
                        return Err(mismatch());
                    };
                    self.heap.try_alloc(NodeKind::Set(Vec::new()))?
                }
                RecordType::Map => {
                    let Source::Entries(_) = &record.source else {
                        return Err(mismatch());
                    };
                    self.heap.try_alloc(NodeKind::Map(Vec::new()))?
                }
                RecordType::Array => {
                    let Source::Elements(_) = &record.source else {
                        return Err(mismatch());
                    };
                    self.heap.try_alloc(NodeKind::Array(Vec::new()))?
                }
                RecordType::RegExp => {
                    let Source::Pattern { pattern, flags } = &record.source else {
                        return Err(mismatch());
                    };
                    let regexp = RegExp::new(pattern.clone(), flags)?;
                    self.heap.try_alloc(NodeKind::RegExp(regexp))?
                }
                RecordType::Object => {
                    let Source::None = &record.source else {
                        return Err(mismatch());
                    };
                    self.heap.try_alloc(NodeKind::Object)?
                }
            };
            refs.push(shell);
        }
        Ok(refs)
    }

    /// Pass 2: fill one shell from its record.
    fn populate(
        &mut self,
        index: usize,
        shell: NodeId,
        record: &Record,
        refs: &[NodeId],
    ) -> Result<()> {
        match (record.record_type, &record.source) {
            (RecordType::Array, Source::Elements(items)) => {
                for item in items {
                    self.heap.push(shell, resolve(item, refs)?)?;
                }
            }
            (RecordType::Set, Source::Elements(items)) => {
                for item in items {
                    self.heap.add(shell, resolve(item, refs)?)?;
                }
            }
            (RecordType::Map, Source::Entries(entries)) => {
                for (k, v) in entries {
                    self.heap
                        .insert(shell, resolve(k, refs)?, resolve(v, refs)?)?;
                }
            }
            _ => {}
        }

        for (key, slot) in &record.keys {
            let value = resolve(slot, refs)?;
            match key.as_str() {
                PROTOTYPE_KEY => {
                    let prototype = match value {
                        Value::Null => Prototype::Null,
                        Value::Node(id) if !self.heap.chain_contains(id, shell)? => {
                            Prototype::Node(id)
                        }
                        _ => return Err(Error::InvalidPrototype { index }),
                    };
                    self.heap.set_prototype(shell, prototype)?;
                }
                CONSTRUCTOR_KEY => self.heap.define(shell, key.as_str(), value, false)?,
                _ => self.heap.set(shell, key.as_str(), value)?,
            }
        }
        Ok(())
    }
}

/// Replace a reference with its shell; literals pass through.
fn resolve(slot: &Slot, refs: &[NodeId]) -> Result<Value> {
    match slot {
        Slot::Ref(i) => refs
            .get(*i)
            .map(|id| Value::Node(*id))
            .ok_or(Error::DanglingReference {
                index: *i,
                len: refs.len(),
            }),
        Slot::Literal(literal) => Ok(literal.clone().into()),
    }
}
