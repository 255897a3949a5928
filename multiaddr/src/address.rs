//! The address value and the operations that compose addresses.

use crate::{
    codec::{DecodeExt, Encode, Read, Write},
    parse,
    protocol::{self, Protocol},
    Config, Error, Segment,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::{
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, SocketAddr},
    str::FromStr,
};
use tracing::{debug, trace};

/// Protocols whose value is a port number.
static PORT_TRANSPORTS: [&Protocol; 4] = [
    &protocol::TCP,
    &protocol::UDP,
    &protocol::DCCP,
    &protocol::SCTP,
];

/// A self-describing network address: an ordered list of [Segment]s, outermost first.
///
/// Every `Multiaddr` is valid: each segment's value encodes under its protocol's size policy.
/// Two addresses are equal when their string forms are equal.
#[derive(Clone, Default)]
pub struct Multiaddr {
    segments: Vec<Segment>,
}

impl Multiaddr {
    /// Returns an address with no segments (rendered as `/`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an address from `segments`, checking and normalizing each value.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Result<Self, Error> {
        let segments = segments
            .into_iter()
            .map(Segment::normalize)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| debug!(?err, "rejected address"))?;
        Ok(Self { segments })
    }

    /// Creates an address from an IP and a port carried by `transport`.
    ///
    /// `transport` must be a port-carrying protocol (`tcp`, `udp`, `dccp` or `sctp`).
    pub fn from_socket_addr(
        addr: SocketAddr,
        transport: &'static Protocol,
    ) -> Result<Self, Error> {
        if !PORT_TRANSPORTS.contains(&transport) {
            return Err(Error::invalid_value(transport.name(), "not a port transport"));
        }
        let mut address = Self::from(addr.ip());
        address.push(Segment::new(transport, addr.port().to_string()))?;
        Ok(address)
    }

    /// Checks that the address encodes.
    ///
    /// Every constructor already does this; the check is exposed for callers that want to
    /// assert it explicitly.
    pub fn validate(&self) -> Result<(), Error> {
        self.encode().map(|_| ())
    }

    /// Returns the canonical binary form.
    pub fn to_bytes(&self) -> Result<Bytes, Error> {
        self.encode().map(BytesMut::freeze)
    }

    /// Returns the segments, outermost first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates over the segments, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the address has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the protocol of each segment, outermost first.
    pub fn protocols(&self) -> Vec<&'static Protocol> {
        self.segments.iter().map(Segment::protocol).collect()
    }

    /// Appends `segment` after checking its value.
    pub fn push(&mut self, segment: Segment) -> Result<(), Error> {
        let segment = segment
            .normalize()
            .inspect_err(|err| debug!(?err, "rejected segment"))?;
        self.segments.push(segment);
        Ok(())
    }

    /// Like [Self::push], but consumes and returns the address.
    pub fn with(mut self, segment: Segment) -> Result<Self, Error> {
        self.push(segment)?;
        Ok(self)
    }

    /// Removes and returns the last segment, or `None` if the address is empty.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Returns a new address with the segments of `other` appended to those of `self`.
    pub fn encapsulate(&self, other: &Multiaddr) -> Multiaddr {
        let mut segments = Vec::with_capacity(self.len() + other.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// Returns the segments of `self` that precede the first occurrence of `other`'s first
    /// segment.
    ///
    /// If that segment does not occur (or `other` is empty), returns `self` unchanged.
    pub fn decapsulate(&self, other: &Multiaddr) -> Multiaddr {
        let Some(first) = other.segments.first() else {
            return self.clone();
        };
        match self.segments.iter().position(|segment| segment == first) {
            Some(index) => self.prefix(index),
            None => self.clone(),
        }
    }

    /// Returns the segments of `self` that precede the last segment using `protocol`.
    ///
    /// If no segment uses `protocol`, returns `self` unchanged.
    pub fn decapsulate_protocol(&self, protocol: &Protocol) -> Multiaddr {
        match self
            .segments
            .iter()
            .rposition(|segment| segment.protocol() == protocol)
        {
            Some(index) => self.prefix(index),
            None => self.clone(),
        }
    }

    /// Like [Self::decapsulate_protocol], looking the protocol up by name.
    ///
    /// An unknown name leaves `self` unchanged.
    pub fn decapsulate_name(&self, name: &str) -> Multiaddr {
        match Protocol::from_name(name) {
            Some(protocol) => self.decapsulate_protocol(protocol),
            None => self.clone(),
        }
    }

    /// Returns the peer identity carried by the last `p2p` (or legacy `ipfs`) segment.
    pub fn peer_id(&self) -> Option<&str> {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.protocol().is_peer_id())
            .and_then(Segment::value)
    }

    /// Returns the filesystem path carried by the last `unix` segment, with a leading `/`.
    pub fn path(&self) -> Option<String> {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.protocol() == &protocol::UNIX)
            .map(|segment| format!("/{}", segment.value().unwrap_or_default()))
    }

    /// Returns the value of the first segment using `protocol`.
    pub fn value_for_protocol(&self, protocol: &Protocol) -> Option<&str> {
        self.position(protocol)
            .and_then(|index| self.segments[index].value())
    }

    /// Returns the IP and port of the first IP segment that is directly followed by a `tcp` or
    /// `udp` segment.
    pub fn to_socket_addr(&self) -> Option<SocketAddr> {
        self.segments.windows(2).find_map(|pair| {
            let ip: IpAddr = match pair[0].protocol().code() {
                code if code == protocol::IP4.code() || code == protocol::IP6.code() => {
                    pair[0].value()?.parse().ok()?
                }
                _ => return None,
            };
            if pair[1].protocol() != &protocol::TCP && pair[1].protocol() != &protocol::UDP {
                return None;
            }
            let port = pair[1].value()?.parse().ok()?;
            Some(SocketAddr::new(ip, port))
        })
    }

    /// Returns `true` if the first segments of `self` are those of `prefix`.
    pub fn starts_with(&self, prefix: &Multiaddr) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns `true` if the last segments of `self` are those of `suffix`.
    pub fn ends_with(&self, suffix: &Multiaddr) -> bool {
        self.segments.ends_with(&suffix.segments)
    }

    /// Replaces the value of the first segment using `protocol` and returns the result.
    ///
    /// If no segment uses `protocol`, the address is returned unchanged. Fails if the new value
    /// does not encode.
    pub fn replace(self, value: &str, protocol: &Protocol) -> Result<Self, Error> {
        let Some(index) = self.position(protocol) else {
            return Ok(self);
        };
        let mut segments = self.segments;
        segments[index] = Segment::new(segments[index].protocol(), value);
        Self::from_segments(segments)
    }

    /// Replaces the value of the first segment using `protocol` in place.
    ///
    /// Fails with [Error::UnknownCodec] if no segment uses `protocol`. If the new value does not
    /// encode, the address is left untouched.
    pub fn replace_in_place(&mut self, value: &str, protocol: &Protocol) -> Result<(), Error> {
        let index = self
            .position(protocol)
            .ok_or(Error::UnknownCodec(protocol.name()))?;
        let segment = Segment::new(self.segments[index].protocol(), value)
            .normalize()
            .inspect_err(|err| debug!(?err, "rejected replacement"))?;
        self.segments[index] = segment;
        Ok(())
    }

    fn position(&self, protocol: &Protocol) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| segment.protocol() == protocol)
    }

    fn prefix(&self, len: usize) -> Multiaddr {
        Self {
            segments: self.segments[..len].to_vec(),
        }
    }
}

impl Write for Multiaddr {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        for segment in &self.segments {
            segment.write(buf)?;
        }
        Ok(())
    }
}

impl Read for Multiaddr {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let mut segments = Vec::new();
        while buf.has_remaining() {
            if segments.len() == cfg.max_segments {
                return Err(Error::LengthExceeded(segments.len() + 1, cfg.max_segments));
            }
            segments.push(Segment::read_cfg(buf, cfg)?);
        }
        trace!(segments = segments.len(), "read address");
        Ok(Self { segments })
    }
}

impl fmt::Display for Multiaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Multiaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Multiaddr").field(&self.to_string()).finish()
    }
}

impl PartialEq for Multiaddr {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Multiaddr {}

impl Hash for Multiaddr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Multiaddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_segments(parse::parse(s)?)
    }
}

impl TryFrom<&str> for Multiaddr {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl TryFrom<String> for Multiaddr {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl TryFrom<&[u8]> for Multiaddr {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Self::decode(bytes)
    }
}

impl TryFrom<Vec<u8>> for Multiaddr {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::decode(Bytes::from(bytes))
    }
}

impl TryFrom<Bytes> for Multiaddr {
    type Error = Error;

    fn try_from(bytes: Bytes) -> Result<Self, Error> {
        Self::decode(bytes)
    }
}

impl From<IpAddr> for Multiaddr {
    fn from(ip: IpAddr) -> Self {
        let protocol = match ip {
            IpAddr::V4(_) => &protocol::IP4,
            IpAddr::V6(_) => &protocol::IP6,
        };
        Self {
            segments: vec![Segment::new(protocol, ip.to_string())],
        }
    }
}

impl IntoIterator for Multiaddr {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Multiaddr {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
