//! Field value encoding.
//!
//! Every encoded value starts with a type tag, so values of different types
//! never collide and a field holding mixed types still has one total order
//! (by tag first). Integers and floats are both numbers and share a tag.

use crate::error::CodecResult;
use crate::number::{encode_bool, encode_float, encode_integer, NUMBER_WIDTH};
use crate::string::encode_string;
use crate::value::{EncodeOptions, FieldValue};

/// Type tags, sorted from lowest to highest.
pub mod tags {
    /// Boolean values.
    pub const BOOL: u8 = b'b';
    /// Numbers, integer or float.
    pub const NUMBER: u8 = b'n';
    /// UTF-8 text.
    pub const TEXT: u8 = b's';
}

/// Encodes one field value into the value component of a key.
///
/// # Errors
///
/// Returns an error for NaN floats and for ordered strings containing the
/// reserved filler character.
///
/// # Example
///
/// ```
/// use indexkv_codec::{encode_value, EncodeOptions, FieldValue, SortOrder};
///
/// let options = EncodeOptions::new(SortOrder::Ascending);
/// let twenty = encode_value(&FieldValue::Integer(20), &options).unwrap();
/// let thirty = encode_value(&FieldValue::Integer(30), &options).unwrap();
/// assert!(twenty < thirty);
/// ```
pub fn encode_value(value: &FieldValue, options: &EncodeOptions) -> CodecResult<Vec<u8>> {
    match value {
        FieldValue::Bool(b) => Ok(vec![tags::BOOL, encode_bool(*b, options.order)]),
        FieldValue::Integer(n) => Ok(number(&encode_integer(*n, options.order))),
        FieldValue::Float(x) => Ok(number(&encode_float(*x, options.order)?)),
        FieldValue::Text(s) => {
            let encoded = encode_string(s, options)?;
            let mut buf = Vec::with_capacity(1 + encoded.len());
            buf.push(tags::TEXT);
            buf.extend_from_slice(&encoded);
            Ok(buf)
        }
    }
}

fn number(encoded: &[u8; NUMBER_WIDTH]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + NUMBER_WIDTH);
    buf.push(tags::NUMBER);
    buf.extend_from_slice(encoded);
    buf
}
