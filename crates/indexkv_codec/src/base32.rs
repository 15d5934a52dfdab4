//! Order-preserving base32hex text encoding.
//!
//! The "extended hex" alphabet of RFC 4648 §7 lists its symbols in ascending
//! ASCII order, so comparing two encodings bytewise gives the same result as
//! comparing the raw inputs. The RFC pad character `=` sorts *above* the
//! digits and would break that property for inputs that are prefixes of one
//! another; it is replaced by [`PAD_SUBSTITUTE`], which sorts below every
//! alphabet symbol.

/// The base32hex alphabet, in ascending ASCII order.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

/// Stands in for `=` padding. Must sort below `ALPHABET[0]`.
pub const PAD_SUBSTITUTE: u8 = b'-';

/// Returns the encoded length of `len` input bytes, padding included.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(5) * 8
}

/// Encodes `data` as base32hex with the order-preserving pad character.
#[must_use]
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(data.len()));

    for chunk in data.chunks(5) {
        let mut block = [0u8; 5];
        block[..chunk.len()].copy_from_slice(chunk);
        let bits = block
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

        // 8 input bits per byte, 5 output bits per symbol, rounded up.
        let symbols = (chunk.len() * 8).div_ceil(5);
        for i in 0..8 {
            if i < symbols {
                let index = (bits >> (35 - i * 5)) & 0x1f;
                out.push(ALPHABET[index as usize]);
            } else {
                out.push(PAD_SUBSTITUTE);
            }
        }
    }

    out
}
