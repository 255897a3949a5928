//! Core codec traits
//!
//! Unlike plain serialization, writing an address can fail: segments hold their payload in
//! string form and only learn whether it has a valid binary form when it is transcoded.

use crate::Error;
use bytes::{Buf, BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// On error, the buffer may contain a partial encoding and should be discarded.
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error>;
}

/// Trait for types that can be encoded to a fresh buffer.
pub trait Encode: Write {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// (Provided method).
    fn encode(&self) -> Result<BytesMut, Error> {
        let mut buffer = BytesMut::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

// Automatically implement `Encode` for types that implement `Write`.
impl<T: Write> Encode for T {}

/// Trait for types that can be read/decoded from a buffer.
///
/// The `Cfg` type bounds what a reader is willing to allocate when decoding untrusted data.
pub trait Read: Sized {
    /// Configuration consulted while reading.
    type Cfg;

    /// Reads a value from the buffer using the provided configuration `cfg`, consuming the
    /// necessary bytes.
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    ///
    /// (Provided method).
    fn decode_cfg(mut buf: impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let result = Self::read_cfg(&mut buf, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Extension trait providing ergonomic read and decode methods using the default config.
pub trait DecodeExt: Decode
where
    Self::Cfg: Default,
{
    /// Reads a value using the default config.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_cfg(buf, &<Self::Cfg as Default>::default())
    }

    /// Decodes a value using the default config.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, &<Self::Cfg as Default>::default())
    }
}

// Automatically implement `DecodeExt` for types whose config has a default.
impl<T: Decode> DecodeExt for T where T::Cfg: Default {}
