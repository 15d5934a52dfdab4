//! Physical key composition.
//!
//! A physical key is `namespace SEP label SEP value SEP id`. Each component
//! is escaped so that it can hold arbitrary bytes:
//!
//! - `0x00` in a component becomes `0x00 0x01`
//! - `SEP` is `0x00 0x00`
//!
//! `SEP` compares below any escaped byte sequence, so a component sorts
//! before every extension of itself and ordering of the value component
//! carries over to the whole key. No component can contain `SEP`.

use crate::error::{CodecError, CodecResult};

/// Separator between key components.
pub const SEPARATOR: [u8; 2] = [0x00, 0x00];

/// Second byte of an escaped `0x00`.
const ESCAPE_BYTE: u8 = 0x01;

/// Appends `component` to `buf`, escaping `0x00`.
pub fn escape_into(component: &[u8], buf: &mut Vec<u8>) {
    for &byte in component {
        if byte == 0x00 {
            buf.push(0x00);
            buf.push(ESCAPE_BYTE);
        } else {
            buf.push(byte);
        }
    }
}

/// Builds a prefix from the given components, each followed by [`SEPARATOR`].
#[must_use]
pub fn compose(components: &[&[u8]]) -> Vec<u8> {
    let capacity = components.iter().map(|c| c.len() + 2).sum();
    let mut buf = Vec::with_capacity(capacity);
    for component in components {
        escape_into(component, &mut buf);
        buf.extend_from_slice(&SEPARATOR);
    }
    buf
}

/// Builds the full physical key of one index entry.
#[must_use]
pub fn compose_key(namespace: &str, label: &str, value: &[u8], id: &str) -> Vec<u8> {
    let mut buf = compose(&[namespace.as_bytes(), label.as_bytes(), value]);
    escape_into(id.as_bytes(), &mut buf);
    buf
}

/// Builds a scan prefix.
///
/// With a value, the prefix covers every entry holding exactly that value.
/// Without one, it covers the whole index.
#[must_use]
pub fn compose_prefix_key(namespace: &str, label: &str, value: Option<&[u8]>) -> Vec<u8> {
    match value {
        Some(value) => compose(&[namespace.as_bytes(), label.as_bytes(), value]),
        None => compose(&[namespace.as_bytes(), label.as_bytes()]),
    }
}

/// Splits a key back into its unescaped components.
///
/// # Errors
///
/// Returns [`CodecError::MalformedKey`] on an invalid escape sequence.
pub fn split_key(key: &[u8]) -> CodecResult<Vec<Vec<u8>>> {
    let mut components = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;

    while i < key.len() {
        if key[i] == 0x00 {
            match key.get(i + 1) {
                Some(0x00) => components.push(std::mem::take(&mut current)),
                Some(&ESCAPE_BYTE) => current.push(0x00),
                Some(other) => {
                    return Err(CodecError::malformed_key(format!(
                        "invalid escape sequence 0x00 0x{other:02x} at offset {i}"
                    )))
                }
                None => return Err(CodecError::malformed_key("truncated escape sequence")),
            }
            i += 2;
        } else {
            current.push(key[i]);
            i += 1;
        }
    }

    components.push(current);
    Ok(components)
}

/// Returns the last component of a full key, the record id.
///
/// # Errors
///
/// Returns [`CodecError::MalformedKey`] if the key is not valid escaped
/// text or has fewer than four components.
pub fn key_id(key: &[u8]) -> CodecResult<String> {
    let mut components = split_key(key)?;
    if components.len() < 4 {
        return Err(CodecError::malformed_key(format!(
            "expected 4 components, found {}",
            components.len()
        )));
    }
    let id = components.pop().unwrap_or_default();
    String::from_utf8(id).map_err(|_| CodecError::malformed_key("id is not valid UTF-8"))
}
