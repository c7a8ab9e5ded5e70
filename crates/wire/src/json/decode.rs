//! JSON decoding for record sequences
//!
//! Implements decoding of JSON text to [`Encoded`], handling special wrappers:
//! - `$f64` for special floats (NaN, ±Inf, -0.0)
//! - `$undefined` for the undefined primitive
//!
//! Decoding checks shape only. Whether references point inside the sequence
//! is checked on hydration.

use marrow_core::{Encoded, Literal, Record, RecordSequence, RecordType, Slot, Source};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use thiserror::Error;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Invalid JSON syntax
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Record type tag outside the closed set
    #[error("Unknown record type: {0}")]
    UnknownType(String),

    /// Required record field absent
    #[error("Record {index}: missing field '{field}'")]
    MissingField {
        /// Record index
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// JSON value that cannot stand in a value position
    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    /// Malformed `$f64` or `$undefined` wrapper, or an unknown `$` wrapper
    #[error("Invalid wrapper: {0}")]
    InvalidWrapper(String),

    /// Source field of the wrong shape for the record type
    #[error("Record {index}: invalid source for type {record_type}")]
    InvalidSource {
        /// Record index
        index: usize,
        /// Declared record type
        record_type: RecordType,
    },

    /// Record that is not an object, or carries unexpected fields
    #[error("Record {index}: {reason}")]
    InvalidRecord {
        /// Record index
        index: usize,
        /// What is wrong
        reason: String,
    },
}

/// Decode JSON text to a serialized value
pub fn decode_json(json: &str) -> Result<Encoded, DecodeError> {
    let value: Json =
        serde_json::from_str(json).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    decode_value(&value)
}

/// Decode a JSON tree: an array is a record sequence, anything else inline
pub fn decode_value(value: &Json) -> Result<Encoded, DecodeError> {
    match value {
        Json::Array(_) => decode_records(value).map(Encoded::Records),
        other => decode_literal(other).map(Encoded::Inline),
    }
}

/// Decode a JSON array of record objects
pub fn decode_records(value: &Json) -> Result<RecordSequence, DecodeError> {
    let Json::Array(items) = value else {
        return Err(DecodeError::InvalidJson("Expected array of records".to_string()));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_record(index, item))
        .collect::<Result<Vec<_>, _>>()
        .map(RecordSequence::from)
}

fn decode_record(index: usize, value: &Json) -> Result<Record, DecodeError> {
    let Json::Object(obj) = value else {
        return Err(DecodeError::InvalidRecord {
            index,
            reason: "expected object".to_string(),
        });
    };
    if let Some(field) = obj
        .keys()
        .find(|k| !matches!(k.as_str(), "type" | "source" | "keys"))
    {
        return Err(DecodeError::InvalidRecord {
            index,
            reason: format!("unexpected field '{}'", field),
        });
    }

    let tag = match obj.get("type") {
        Some(Json::String(tag)) => tag,
        Some(_) => {
            return Err(DecodeError::InvalidRecord {
                index,
                reason: "type must be a string".to_string(),
            })
        }
        None => return Err(DecodeError::MissingField { index, field: "type" }),
    };
    let record_type =
        RecordType::from_name(tag).ok_or_else(|| DecodeError::UnknownType(tag.clone()))?;

    let source = decode_source(index, record_type, obj.get("source"))?;
    let keys = match obj.get("keys") {
        Some(Json::Object(keys)) => decode_keys(keys)?,
        Some(_) => {
            return Err(DecodeError::InvalidRecord {
                index,
                reason: "keys must be an object".to_string(),
            })
        }
        None => return Err(DecodeError::MissingField { index, field: "keys" }),
    };

    Ok(Record {
        record_type,
        source,
        keys,
    })
}

fn decode_keys(keys: &Map<String, Json>) -> Result<BTreeMap<String, Slot>, DecodeError> {
    keys.iter()
        .map(|(k, v)| decode_slot(v).map(|slot| (k.clone(), slot)))
        .collect()
}

fn decode_source(
    index: usize,
    record_type: RecordType,
    source: Option<&Json>,
) -> Result<Source, DecodeError> {
    let invalid = || DecodeError::InvalidSource { index, record_type };

    let Some(source) = source else {
        return match record_type {
            RecordType::Object => Ok(Source::None),
            _ => Err(DecodeError::MissingField {
                index,
                field: "source",
            }),
        };
    };

    match (record_type, source) {
        (RecordType::Array | RecordType::Set, Json::Array(items)) => items
            .iter()
            .map(decode_slot)
            .collect::<Result<Vec<_>, _>>()
            .map(Source::Elements),
        (RecordType::Map, Json::Array(entries)) => entries
            .iter()
            .map(|entry| match entry {
                Json::Array(pair) => match pair.as_slice() {
                    [k, v] => Ok::<_, DecodeError>((decode_slot(k)?, decode_slot(v)?)),
                    _ => Err(invalid()),
                },
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Source::Entries),
        (RecordType::RegExp, Json::Array(parts)) => match parts.as_slice() {
            [Json::String(pattern), Json::String(flags)] => Ok(Source::Pattern {
                pattern: pattern.clone(),
                flags: flags.clone(),
            }),
            _ => Err(invalid()),
        },
        (RecordType::Function, Json::String(text)) => Ok(Source::Text(text.clone())),
        (RecordType::Symbol, Json::String(description)) => {
            Ok(Source::Description(Some(description.clone())))
        }
        (RecordType::Symbol, Json::Null) => Ok(Source::Description(None)),
        _ => Err(invalid()),
    }
}

/// Decode one value position: `[n]` is a reference, anything else a literal
pub fn decode_slot(value: &Json) -> Result<Slot, DecodeError> {
    match value {
        Json::Array(items) => match items.as_slice() {
            [Json::Number(n)] => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(Slot::Ref)
                .ok_or_else(|| DecodeError::InvalidSlot(format!("bad reference index {}", n))),
            _ => Err(DecodeError::InvalidSlot(format!(
                "array of {} elements is not a reference",
                items.len()
            ))),
        },
        other => decode_literal(other).map(Slot::Literal),
    }
}

fn decode_literal(value: &Json) -> Result<Literal, DecodeError> {
    match value {
        Json::Null => Ok(Literal::Null),
        Json::Bool(b) => Ok(Literal::Bool(*b)),
        Json::String(s) => Ok(Literal::String(s.clone())),
        Json::Number(n) => {
            // Try parsing as i64 first; large integers fall back to f64
            if let Some(i) = n.as_i64() {
                Ok(Literal::Int(i))
            } else {
                n.as_f64()
                    .map(Literal::Float)
                    .ok_or_else(|| DecodeError::InvalidSlot(format!("bad number {}", n)))
            }
        }
        Json::Object(obj) => decode_wrapper(obj),
        Json::Array(_) => Err(DecodeError::InvalidSlot(
            "array is not a literal".to_string(),
        )),
    }
}

/// Decode single-key `$` wrappers
fn decode_wrapper(obj: &Map<String, Json>) -> Result<Literal, DecodeError> {
    let mut entries = obj.iter();
    let (Some((key, value)), None) = (entries.next(), entries.next()) else {
        return Err(DecodeError::InvalidSlot(
            "object is not a single-key wrapper".to_string(),
        ));
    };
    match (key.as_str(), value) {
        ("$f64", Json::String(s)) => decode_f64_wrapper(s),
        ("$undefined", Json::Bool(true)) => Ok(Literal::Undefined),
        (key, value) => Err(DecodeError::InvalidWrapper(format!("{}: {}", key, value))),
    }
}

/// Decode $f64 wrapper (special floats)
fn decode_f64_wrapper(value: &str) -> Result<Literal, DecodeError> {
    let f = match value {
        "NaN" => f64::NAN,
        "+Inf" => f64::INFINITY,
        "-Inf" => f64::NEG_INFINITY,
        "-0.0" => -0.0_f64,
        _ => return Err(DecodeError::InvalidWrapper(format!("$f64: {}", value))),
    };
    Ok(Literal::Float(f))
}
