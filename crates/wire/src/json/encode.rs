//! JSON encoding for record sequences
//!
//! Implements encoding of [`Encoded`] to JSON with special wrappers:
//! - `$f64` for special floats (NaN, ±Inf, -0.0)
//! - `$undefined` for the undefined primitive

use marrow_core::{Encoded, Literal, Record, RecordSequence, Slot, Source};
use serde_json::{json, Map, Number, Value as Json};

/// Encode a serialized value to a JSON string
pub fn encode_json(encoded: &Encoded) -> String {
    encode_value(encoded).to_string()
}

/// Encode a serialized value to a JSON tree
pub fn encode_value(encoded: &Encoded) -> Json {
    match encoded {
        Encoded::Inline(literal) => encode_literal(literal),
        Encoded::Records(records) => encode_records(records),
    }
}

/// Encode a record sequence as a JSON array of record objects
pub fn encode_records(records: &RecordSequence) -> Json {
    Json::Array(records.iter().map(encode_record).collect())
}

fn encode_record(record: &Record) -> Json {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Json::from(record.record_type.name()));
    if let Some(source) = encode_source(&record.source) {
        obj.insert("source".to_string(), source);
    }
    // serde_json's Map is ordered by key, so output is deterministic
    let keys: Map<String, Json> = record
        .keys
        .iter()
        .map(|(k, slot)| (k.clone(), encode_slot(slot)))
        .collect();
    obj.insert("keys".to_string(), Json::Object(keys));
    Json::Object(obj)
}

fn encode_source(source: &Source) -> Option<Json> {
    match source {
        Source::None => None,
        Source::Elements(items) => Some(Json::Array(items.iter().map(encode_slot).collect())),
        Source::Entries(entries) => Some(Json::Array(
            entries
                .iter()
                .map(|(k, v)| Json::Array(vec![encode_slot(k), encode_slot(v)]))
                .collect(),
        )),
        Source::Pattern { pattern, flags } => Some(json!([pattern, flags])),
        Source::Text(text) => Some(Json::from(text.as_str())),
        Source::Description(Some(description)) => Some(Json::from(description.as_str())),
        Source::Description(None) => Some(Json::Null),
    }
}

/// Encode one slot: a reference becomes `[n]`, a literal its JSON form
pub fn encode_slot(slot: &Slot) -> Json {
    match slot {
        Slot::Ref(index) => json!([index]),
        Slot::Literal(literal) => encode_literal(literal),
    }
}

fn encode_literal(literal: &Literal) -> Json {
    match literal {
        Literal::Undefined => json!({ "$undefined": true }),
        Literal::Null => Json::Null,
        Literal::Bool(b) => Json::Bool(*b),
        Literal::Int(i) => Json::from(*i),
        Literal::Float(f) => encode_float(*f),
        Literal::String(s) => Json::from(s.as_str()),
    }
}

/// Encode a float, using $f64 wrapper for special values
fn encode_float(f: f64) -> Json {
    if f.is_nan() {
        json!({ "$f64": "NaN" })
    } else if f == f64::INFINITY {
        json!({ "$f64": "+Inf" })
    } else if f == f64::NEG_INFINITY {
        json!({ "$f64": "-Inf" })
    } else if f.to_bits() == (-0.0_f64).to_bits() {
        json!({ "$f64": "-0.0" })
    } else {
        // Finite: serde_json prints a decimal point or exponent for every f64
        match Number::from_f64(f) {
            Some(n) => Json::Number(n),
            None => json!({ "$f64": "NaN" }),
        }
    }
}
