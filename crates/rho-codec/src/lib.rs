//! Canonical byte encodings for rho values.
//!
//! Every [`Value`] has exactly one canonical byte form, independent of any
//! compression applied later:
//!
//! - [`Table`](rho_types::Table) and [`Column`](rho_types::Column) encode as
//!   delimited text: one header line of column names, one line per row,
//!   RFC-4180-style quoting. See [`text`].
//! - [`Tensor`](rho_types::Tensor) encodes as a self-describing binary
//!   block: magic, version, element type, shape, then raw row-major
//!   elements. See [`tensor`].
//!
//! Decoding is the strict inverse. A byte stream that does not parse
//! completely (truncated, trailing bytes, shape mismatch, bad header) fails
//! with [`CodecError::MalformedPayload`] rather than yielding a partial
//! value.

pub mod error;
pub mod tensor;
pub mod text;

pub use error::{CodecError, CodecResult};

use rho_types::{TypeTag, Value};

/// Encode a value into `(tag, canonical bytes)`.
///
/// Encoding is total over the closed [`Value`] union: every variant has a
/// canonical form, so this cannot fail.
pub fn encode(value: &Value) -> (TypeTag, Vec<u8>) {
    let bytes = match value {
        Value::Table(t) => text::encode_table(t),
        Value::Column(c) => text::encode_column(c),
        Value::Tensor(t) => tensor::encode_tensor(t),
    };
    (value.type_tag(), bytes)
}

/// Decode canonical bytes back into the value the tag promises.
pub fn decode(tag: TypeTag, bytes: &[u8]) -> CodecResult<Value> {
    match tag {
        TypeTag::Table => text::decode_table(bytes).map(Value::Table),
        TypeTag::Column => text::decode_column(bytes).map(Value::Column),
        TypeTag::Tensor => tensor::decode_tensor(bytes).map(Value::Tensor),
    }
}
