//! Wire encoding for Marrow
//!
//! JSON transport for serialized value graphs. A record sequence travels as
//! a JSON array of record objects; an inline primitive travels as itself.
//!
//! ## Wire Encoding Rules
//!
//! | Position | JSON Encoding |
//! |----------|--------------|
//! | Record sequence | `[{...}, ...]` |
//! | Record | `{"type": "...", "source": ..., "keys": {...}}` |
//! | Reference | `[n]` |
//! | Null / Bool / String | native |
//! | Int | integer |
//! | Float (normal) | number with `.` or exponent |
//! | Float (special) | `{"$f64": "..."}` |
//! | Undefined | `{"$undefined": true}` |
//!
//! ## Examples
//!
//! ```
//! use marrow_wire::{encode_json, decode_json};
//! use marrow_core::{Encoded, Literal};
//!
//! let json = encode_json(&Encoded::Inline(Literal::Int(42)));
//! assert_eq!(json, "42");
//!
//! let decoded = decode_json("42").unwrap();
//! assert_eq!(decoded, Encoded::Inline(Literal::Int(42)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

pub use json::{
    decode_json, decode_records, decode_slot, decode_value, encode_json, encode_records,
    encode_slot, encode_value, DecodeError,
};
