//! Fixed-width numeric and boolean encodings.
//!
//! Integers and floats share one numeric order, so `20` and `20.0` encode
//! identically and a field may mix both. A number is 16 big-endian bytes:
//!
//! - the sortable bits of its nearest `f64`: positives flip the sign bit,
//!   negatives flip every bit, `-0.0` is folded into `0.0`
//! - the sign-flipped exact remainder `value - nearest`, which is non-zero
//!   only for integers beyond 2^53 and orders values sharing one `f64`
//!
//! Rounding to `f64` is monotonic, so comparing the pair matches comparing
//! the exact values. NaN is rejected.
//!
//! Descending order takes the bitwise complement of the ascending bytes,
//! which reverses the order exactly for the full range.

use crate::error::{CodecError, CodecResult};
use crate::value::SortOrder;

/// Width of every encoded number.
pub const NUMBER_WIDTH: usize = 16;

/// Width of each half of an encoded number.
const HALF_WIDTH: usize = NUMBER_WIDTH / 2;

/// Constant for flipping the sign bit.
const SIGN_FLIP: u64 = 0x8000_0000_0000_0000;

/// Boolean symbols, in ascending order.
pub const FALSE_SYMBOL: u8 = b'0';
/// See [`FALSE_SYMBOL`].
pub const TRUE_SYMBOL: u8 = b'1';

/// Encodes an integer.
#[must_use]
pub fn encode_integer(value: i64, order: SortOrder) -> [u8; NUMBER_WIDTH] {
    #[allow(clippy::cast_precision_loss)]
    let nearest = value as f64;
    // `nearest` is integral and within 2^63, so the cast back is exact and
    // the remainder is at most 2^10 in magnitude.
    #[allow(clippy::cast_possible_truncation)]
    let remainder = (i128::from(value) - nearest as i128) as i64;
    directed(float_bits(nearest), integer_bits(remainder), order)
}

/// Encodes a float.
///
/// # Errors
///
/// Returns [`CodecError::NotANumber`] for NaN.
pub fn encode_float(value: f64, order: SortOrder) -> CodecResult<[u8; NUMBER_WIDTH]> {
    if value.is_nan() {
        return Err(CodecError::NotANumber);
    }
    Ok(directed(float_bits(value), integer_bits(0), order))
}

/// Encodes a boolean as a single symbol.
#[must_use]
pub fn encode_bool(value: bool, order: SortOrder) -> u8 {
    match (value, order.is_descending()) {
        (false, false) | (true, true) => FALSE_SYMBOL,
        (true, false) | (false, true) => TRUE_SYMBOL,
    }
}

fn float_bits(value: f64) -> u64 {
    let value = if value == 0.0 { 0.0 } else { value };
    let bits = value.to_bits();
    if bits & SIGN_FLIP == 0 {
        bits ^ SIGN_FLIP
    } else {
        !bits
    }
}

#[allow(clippy::cast_sign_loss)]
fn integer_bits(value: i64) -> u64 {
    (value as u64) ^ SIGN_FLIP
}

fn directed(high: u64, low: u64, order: SortOrder) -> [u8; NUMBER_WIDTH] {
    let (high, low) = if order.is_descending() {
        (!high, !low)
    } else {
        (high, low)
    };
    let mut out = [0u8; NUMBER_WIDTH];
    out[..HALF_WIDTH].copy_from_slice(&high.to_be_bytes());
    out[HALF_WIDTH..].copy_from_slice(&low.to_be_bytes());
    out
}
