//! Unsigned variable-length integers
//!
//! Values are written little-endian in groups of 7 bits. The high bit of each byte is the
//! "continuation" bit and is set on every byte except the last.
//!
//! An encoding is at most [MAX_LEN] bytes long, which limits values to [MAX_VALUE]. Encodings
//! with redundant trailing zero groups are rejected, so every value has exactly one encoding.

use crate::Error;
use bytes::{Buf, BufMut};

const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;
const INVALID_VARINT: &str = "invalid varint";

/// Maximum number of bytes in a single varint.
pub const MAX_LEN: usize = 9;

/// Largest value that fits in [MAX_LEN] bytes.
pub const MAX_VALUE: u64 = (1 << (MAX_LEN * DATA_BITS_PER_BYTE)) - 1;

/// Encodes `value` as a varint.
///
/// `value` must not exceed [MAX_VALUE].
pub fn write(value: u64, buf: &mut impl BufMut) {
    debug_assert!(value <= MAX_VALUE, "varint value out of range: {value}");
    let mut val = value;
    while val >= CONTINUATION_BIT_MASK as u64 {
        buf.put_u8((val as u8) | CONTINUATION_BIT_MASK);
        val >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(val as u8);
}

/// Decodes a varint from the front of `buf`, advancing it past the consumed bytes.
pub fn read(buf: &mut impl Buf) -> Result<u64, Error> {
    let mut result = 0u64;
    for index in 0..MAX_LEN {
        if !buf.has_remaining() {
            return Err(Error::InvalidFormat("unexpected end of buffer"));
        }
        let byte = buf.get_u8();

        // A trailing zero group means the value could have been written in fewer bytes.
        if index > 0 && byte == 0 {
            return Err(Error::InvalidFormat(INVALID_VARINT));
        }

        result |= ((byte & DATA_BITS_MASK) as u64) << (index * DATA_BITS_PER_BYTE);
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
    }
    Err(Error::InvalidFormat(INVALID_VARINT))
}

/// Returns the number of bytes [write] uses for `value`.
pub fn size(value: u64) -> usize {
    let data_bits = (u64::BITS - value.leading_zeros()) as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}
