//! Ordered string encoding.
//!
//! Strings go through independent stages so each can be tested on its own:
//!
//! 1. **Invert** (descending only): every code point `c` becomes
//!    `MAX_CODE_POINT - c`, reversing relative order.
//! 2. **Pad**: right-pad to the index's pad length with a filler that sorts
//!    where "end of string" must sort. Ascending uses the lowest unit;
//!    descending uses a unit above every inverted code point.
//! 3. **Serialize**: ascending strings stay UTF-8. Descending units are
//!    written as 3-byte big-endian integers (inverted values can land in the
//!    surrogate range and are not valid `char`s), then optionally
//!    re-encoded through the base32hex alphabet.

use crate::base32;
use crate::error::{CodecError, CodecResult};
use crate::value::{EncodeOptions, SortOrder};

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = char::MAX as u32;

/// Filler for ascending strings. Reserved: ordered strings may not contain it.
pub const ASCENDING_FILLER: char = '\0';

/// Filler for descending strings, one above any inverted code point.
pub const DESCENDING_FILLER: u32 = MAX_CODE_POINT + 1;

/// Bytes used to serialize one descending code unit.
pub const UNIT_WIDTH: usize = 3;

/// Stage 1: invert every code point.
#[must_use]
pub fn invert_code_points(s: &str) -> Vec<u32> {
    s.chars().map(|c| MAX_CODE_POINT - u32::from(c)).collect()
}

/// Stage 2: right-pad `units` to `pad_length` with `filler`.
///
/// Units already at or beyond `pad_length` are left as they are.
#[must_use]
pub fn pad_units(mut units: Vec<u32>, pad_length: usize, filler: u32) -> Vec<u32> {
    if units.len() < pad_length {
        units.resize(pad_length, filler);
    }
    units
}

/// Stage 3: serialize code units as fixed-width big-endian integers.
#[must_use]
pub fn units_to_bytes(units: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * UNIT_WIDTH);
    for unit in units {
        out.extend_from_slice(&unit.to_be_bytes()[4 - UNIT_WIDTH..]);
    }
    out
}

/// Encodes a string for an index with the given options.
///
/// # Errors
///
/// Returns [`CodecError::ReservedCharacter`] if an ordered string contains
/// [`ASCENDING_FILLER`].
pub fn encode_string(s: &str, options: &EncodeOptions) -> CodecResult<Vec<u8>> {
    match options.order {
        SortOrder::Unordered => Ok(s.as_bytes().to_vec()),
        SortOrder::Ascending => {
            reject_filler(s)?;
            Ok(encode_ascending(s, options.string_pad_length))
        }
        SortOrder::Descending => {
            reject_filler(s)?;
            Ok(encode_descending(
                s,
                options.string_pad_length,
                options.base32,
            ))
        }
    }
}

fn reject_filler(s: &str) -> CodecResult<()> {
    if s.contains(ASCENDING_FILLER) {
        return Err(CodecError::ReservedCharacter {
            code_point: u32::from(ASCENDING_FILLER),
        });
    }
    Ok(())
}

fn encode_ascending(s: &str, pad_length: usize) -> Vec<u8> {
    let chars = s.chars().count();
    let mut out = Vec::with_capacity(s.len() + pad_length.saturating_sub(chars));
    out.extend_from_slice(s.as_bytes());
    // The filler is a single UTF-8 byte, so one byte per missing character.
    out.resize(out.len() + pad_length.saturating_sub(chars), ASCENDING_FILLER as u8);
    out
}

fn encode_descending(s: &str, pad_length: usize, base32: bool) -> Vec<u8> {
    let inverted = invert_code_points(s);
    // At least one filler, so a string always sorts before its own prefixes
    // even past the pad length.
    let target = pad_length.max(inverted.len() + 1);
    let units = pad_units(inverted, target, DESCENDING_FILLER);
    let raw = units_to_bytes(&units);
    if base32 {
        base32::encode(&raw)
    } else {
        raw
    }
}
