//! # indexkv Codec
//!
//! Order-preserving key encoding for indexkv.
//!
//! This crate turns typed field values into bytes whose plain lexicographic
//! order matches the logical order an index asks for, and assembles those
//! bytes into physical keys:
//!
//! - Strings: optional code point inversion, padding, optional base32hex
//! - Numbers: integers and floats in one fixed-width order, complemented for
//!   descending
//! - Booleans: `'0'` / `'1'`, swapped for descending
//! - Keys: escaped components joined by a separator that sorts lowest
//!
//! All functions are pure. Encodings are order-preserving, not reversible:
//! the original value is read from the stored record, never from the key.
//!
//! ## Usage
//!
//! ```
//! use indexkv_codec::{compose_key, encode_value, EncodeOptions, FieldValue, SortOrder};
//!
//! let options = EncodeOptions::new(SortOrder::Descending);
//! let abcd = encode_value(&FieldValue::from("abcd"), &options).unwrap();
//! let abcde = encode_value(&FieldValue::from("abcde"), &options).unwrap();
//!
//! // Descending: the longer string comes first.
//! assert!(abcde < abcd);
//!
//! let key = compose_key("users", "desc:name", &abcd, "user-1");
//! assert!(key.starts_with(b"users"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod base32;
mod error;
mod field;
mod key;
pub mod number;
pub mod string;
mod value;

pub use error::{CodecError, CodecResult};
pub use field::{encode_value, tags};
pub use key::{
    compose, compose_key, compose_prefix_key, escape_into, key_id, split_key, SEPARATOR,
};
pub use value::{EncodeOptions, FieldValue, SortOrder};
