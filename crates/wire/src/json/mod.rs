//! JSON transport for record sequences
//!
//! Special wrappers are used for values JSON cannot carry directly:
//!
//! - `{"$f64": "NaN|+Inf|-Inf|-0.0"}` for special floats
//! - `{"$undefined": true}` for the undefined primitive
//!
//! A reference is a one-element array `[n]`. Records never appear in slot
//! position, so any array there is a reference.

mod decode;
mod encode;

pub use decode::{decode_json, decode_records, decode_slot, decode_value, DecodeError};
pub use encode::{encode_json, encode_records, encode_slot, encode_value};
