//! A single protocol and its value.

use crate::{
    codec::{Read, Write},
    protocol::{Protocol, Size},
    varint, Config, Error,
};
use bytes::{Buf, BufMut};
use std::fmt;
use tracing::trace;

/// One `(protocol, value)` unit of a [crate::Multiaddr].
///
/// Only the string form of the value is stored. The binary form is produced on demand by the
/// protocol's transcoder, which is also where a bad value (a non-numeric port, say) is caught.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    protocol: &'static Protocol,
    value: Option<String>,
}

impl Segment {
    /// Creates a segment carrying `value`. An empty value is treated as no value.
    ///
    /// The value is not checked until the segment is encoded or placed in an address.
    pub fn new(protocol: &'static Protocol, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            protocol,
            value: (!value.is_empty()).then_some(value),
        }
    }

    /// Creates a segment without a value.
    pub fn bare(protocol: &'static Protocol) -> Self {
        Self {
            protocol,
            value: None,
        }
    }

    pub(crate) fn from_parts(protocol: &'static Protocol, value: Option<String>) -> Self {
        match value {
            Some(value) => Self::new(protocol, value),
            None => Self::bare(protocol),
        }
    }

    /// Returns the segment's protocol.
    pub fn protocol(&self) -> &'static Protocol {
        self.protocol
    }

    /// Returns the string form of the value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the binary form of the value (without the code or length prefix).
    ///
    /// Fails if the value cannot be transcoded or does not satisfy the protocol's size policy.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let name = self.protocol.name();
        let bytes = match (self.protocol.size(), self.value.as_deref()) {
            (Size::Zero, None) => return Ok(Vec::new()),
            (Size::Fixed(_), None) => return Err(Error::invalid_value(name, "missing value")),
            (_, value) => (self.protocol.transcoder().to_bytes)(value.unwrap_or_default())
                .map_err(|reason| Error::invalid_value(name, reason))?,
        };
        if let Size::Fixed(bits) = self.protocol.size() {
            let expected = (bits / 8) as usize;
            if bytes.len() != expected {
                return Err(Error::invalid_value(
                    name,
                    format!("expected {expected} bytes, found {}", bytes.len()),
                ));
            }
        }
        Ok(bytes)
    }

    /// Transcodes the value to bytes and back, yielding the canonical string form.
    ///
    /// Two values with the same binary form (`0:0::1` and `::1`, say) normalize to the same
    /// segment.
    pub(crate) fn normalize(self) -> Result<Self, Error> {
        let bytes = self.to_bytes()?;
        if self.protocol.size() == Size::Zero {
            return Ok(self);
        }
        let value = (self.protocol.transcoder().to_string)(&bytes)
            .map_err(|reason| Error::invalid_value(self.protocol.name(), reason))?;
        Ok(Self::new(self.protocol, value))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.protocol.name())?;
        if let Some(value) = &self.value {
            write!(f, "/{value}")?;
        }
        Ok(())
    }
}

impl Write for Segment {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        let payload = self.to_bytes()?;
        varint::write(self.protocol.code(), buf);
        if self.protocol.size() == Size::Variable {
            varint::write(payload.len() as u64, buf);
        }
        buf.put_slice(&payload);
        Ok(())
    }
}

impl Read for Segment {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let code = varint::read(buf)?;
        let protocol =
            Protocol::from_code(code).ok_or_else(|| Error::UnknownProtocol(code.to_string()))?;
        let len = match protocol.size() {
            Size::Zero => {
                trace!(protocol = protocol.name(), "read segment");
                return Ok(Self::bare(protocol));
            }
            Size::Fixed(bits) => (bits / 8) as usize,
            Size::Variable => {
                let len = usize::try_from(varint::read(buf)?).unwrap_or(usize::MAX);
                if len > cfg.max_value_len {
                    return Err(Error::LengthExceeded(len, cfg.max_value_len));
                }
                len
            }
        };
        if buf.remaining() < len {
            return Err(Error::InvalidFormat("unexpected end of buffer"));
        }
        let payload = buf.copy_to_bytes(len);
        let value = (protocol.transcoder().to_string)(&payload)
            .map_err(|reason| Error::invalid_value(protocol.name(), reason))?;
        trace!(protocol = protocol.name(), len, "read segment");
        Ok(Self::new(protocol, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::{DecodeExt, Encode},
        protocol::{IP4, IP6, P2P, P2P_CIRCUIT, TCP, UNIX},
    };

    #[test]
    fn test_empty_value_is_none() {
        assert_eq!(Segment::new(&UNIX, ""), Segment::bare(&UNIX));
        assert_eq!(Segment::new(&UNIX, "").value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Segment::new(&TCP, "80").to_string(), "/tcp/80");
        assert_eq!(Segment::bare(&P2P_CIRCUIT).to_string(), "/p2p-circuit");
        assert_eq!(Segment::new(&UNIX, "tmp/socket").to_string(), "/unix/tmp/socket");
    }

    #[test]
    fn test_encode_fixed() {
        let encoded = Segment::new(&IP4, "127.0.0.1").encode().unwrap();
        assert_eq!(&encoded[..], &[0x04, 127, 0, 0, 1]);

        let encoded = Segment::new(&TCP, "9090").encode().unwrap();
        assert_eq!(&encoded[..], &[0x06, 0x23, 0x82]);
    }

    #[test]
    fn test_encode_variable() {
        let encoded = Segment::new(&UNIX, "a/b").encode().unwrap();
        assert_eq!(&encoded[..], &[0x90, 0x03, 0x03, b'a', b'/', b'b']);

        // No value is an empty payload
        let encoded = Segment::bare(&UNIX).encode().unwrap();
        assert_eq!(&encoded[..], &[0x90, 0x03, 0x00]);
    }

    #[test]
    fn test_encode_zero() {
        let encoded = Segment::bare(&P2P_CIRCUIT).encode().unwrap();
        assert_eq!(&encoded[..], &[0xA2, 0x02]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Segment::new(&TCP, "http").to_bytes(),
            Err(Error::InvalidValue { protocol: "tcp", .. })
        ));
        assert!(matches!(
            Segment::bare(&IP4).to_bytes(),
            Err(Error::InvalidValue { protocol: "ip4", .. })
        ));
        assert!(matches!(
            Segment::new(&P2P_CIRCUIT, "x").to_bytes(),
            Err(Error::InvalidValue { protocol: "p2p-circuit", .. })
        ));
        assert!(matches!(
            Segment::new(&P2P, "0OIl").to_bytes(),
            Err(Error::InvalidValue { protocol: "p2p", .. })
        ));
    }

    #[test]
    fn test_normalize() {
        let segment = Segment::new(&IP6, "0:0:0:0:0:0:0:1").normalize().unwrap();
        assert_eq!(segment.value(), Some("::1"));

        let segment = Segment::new(&TCP, "0080").normalize().unwrap();
        assert_eq!(segment.value(), Some("80"));

        let segment = Segment::bare(&P2P_CIRCUIT).normalize().unwrap();
        assert_eq!(segment, Segment::bare(&P2P_CIRCUIT));
    }

    #[test]
    fn test_decode() {
        let segment = Segment::decode(&[0x04, 10, 0, 0, 1][..]).unwrap();
        assert_eq!(segment, Segment::new(&IP4, "10.0.0.1"));

        let segment = Segment::decode(&[0x90, 0x03, 0x00][..]).unwrap();
        assert_eq!(segment, Segment::bare(&UNIX));
    }

    #[test]
    fn test_decode_errors() {
        // Unknown code
        assert_eq!(
            Segment::decode(&[0x05][..]),
            Err(Error::UnknownProtocol("5".into()))
        );

        // Truncated fixed payload
        assert!(matches!(
            Segment::decode(&[0x04, 10, 0][..]),
            Err(Error::InvalidFormat(_))
        ));

        // Declared length past the end of the buffer
        assert!(matches!(
            Segment::decode(&[0x90, 0x03, 0x05, b'a'][..]),
            Err(Error::InvalidFormat(_))
        ));

        // Payload without a string form
        assert!(matches!(
            Segment::decode(&[0x90, 0x03, 0x02, 0xFF, 0xFE][..]),
            Err(Error::InvalidValue { protocol: "unix", .. })
        ));

        // Trailing bytes
        assert_eq!(
            Segment::decode(&[0x06, 0x00, 0x50, 0x00][..]),
            Err(Error::ExtraData(1))
        );
    }

    #[test]
    fn test_decode_length_limit() {
        let cfg = Config {
            max_value_len: 2,
            ..Config::default()
        };
        let bytes = [0x90, 0x03, 0x03, b'a', b'/', b'b'];
        assert_eq!(
            Segment::read_cfg(&mut &bytes[..], &cfg),
            Err(Error::LengthExceeded(3, 2))
        );
    }
}
