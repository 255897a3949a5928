//! Registry of known address protocols.
//!
//! Every protocol is a `'static` descriptor. The registry indexes them by code and by name once,
//! on first use, and is read-only afterwards.
//!
//! Codes follow the multicodec table. `ipfs` is the legacy name for `p2p`: both resolve by name,
//! but code 421 resolves to `p2p`.

use crate::transcode::{self, Transcoder};
use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    sync::LazyLock,
};

/// How many payload bytes follow a protocol code on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    /// The protocol carries no value.
    Zero,
    /// The value is always this many bits.
    Fixed(u32),
    /// The value is prefixed by its length in bytes, as a varint.
    Variable,
}

/// A registered addressing scheme.
pub struct Protocol {
    code: u64,
    name: &'static str,
    size: Size,
    transcoder: &'static Transcoder,
}

impl Protocol {
    const fn zero(code: u64, name: &'static str) -> Self {
        Self {
            code,
            name,
            size: Size::Zero,
            transcoder: &transcode::NONE,
        }
    }

    const fn fixed(
        code: u64,
        name: &'static str,
        bits: u32,
        transcoder: &'static Transcoder,
    ) -> Self {
        Self {
            code,
            name,
            size: Size::Fixed(bits),
            transcoder,
        }
    }

    const fn variable(code: u64, name: &'static str, transcoder: &'static Transcoder) -> Self {
        Self {
            code,
            name,
            size: Size::Variable,
            transcoder,
        }
    }

    /// Numeric code written on the wire.
    pub const fn code(&self) -> u64 {
        self.code
    }

    /// Name used in the string form.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Size policy of the protocol's value.
    pub const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn transcoder(&self) -> &'static Transcoder {
        self.transcoder
    }

    /// Whether the protocol names a peer identity (`p2p` or its legacy name `ipfs`).
    pub fn is_peer_id(&self) -> bool {
        self.code == P2P.code
    }

    /// Looks up a protocol by its code.
    pub fn from_code(code: u64) -> Option<&'static Protocol> {
        REGISTRY.by_code.get(&code).copied()
    }

    /// Looks up a protocol by its name.
    pub fn from_name(name: &str) -> Option<&'static Protocol> {
        REGISTRY.by_name.get(name).copied()
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Protocol {}

impl Hash for Protocol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protocol")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub static IP4: Protocol = Protocol::fixed(4, "ip4", 32, &transcode::IP4);
pub static TCP: Protocol = Protocol::fixed(6, "tcp", 16, &transcode::PORT);
pub static DCCP: Protocol = Protocol::fixed(33, "dccp", 16, &transcode::PORT);
pub static IP6: Protocol = Protocol::fixed(41, "ip6", 128, &transcode::IP6);
pub static IP6ZONE: Protocol = Protocol::variable(42, "ip6zone", &transcode::UTF8);
pub static DNS: Protocol = Protocol::variable(53, "dns", &transcode::UTF8);
pub static DNS4: Protocol = Protocol::variable(54, "dns4", &transcode::UTF8);
pub static DNS6: Protocol = Protocol::variable(55, "dns6", &transcode::UTF8);
pub static DNSADDR: Protocol = Protocol::variable(56, "dnsaddr", &transcode::UTF8);
pub static SCTP: Protocol = Protocol::fixed(132, "sctp", 16, &transcode::PORT);
pub static UDP: Protocol = Protocol::fixed(273, "udp", 16, &transcode::PORT);
pub static P2P_WEBRTC_STAR: Protocol = Protocol::zero(275, "p2p-webrtc-star");
pub static P2P_WEBRTC_DIRECT: Protocol = Protocol::zero(276, "p2p-webrtc-direct");
pub static WEBRTC_DIRECT: Protocol = Protocol::zero(280, "webrtc-direct");
pub static WEBRTC: Protocol = Protocol::zero(281, "webrtc");
pub static P2P_CIRCUIT: Protocol = Protocol::zero(290, "p2p-circuit");
pub static UDT: Protocol = Protocol::zero(301, "udt");
pub static UTP: Protocol = Protocol::zero(302, "utp");
pub static UNIX: Protocol = Protocol::variable(400, "unix", &transcode::UTF8);
pub static P2P: Protocol = Protocol::variable(421, "p2p", &transcode::BASE58);
pub static IPFS: Protocol = Protocol::variable(421, "ipfs", &transcode::BASE58);
pub static HTTPS: Protocol = Protocol::zero(443, "https");
pub static ONION: Protocol = Protocol::fixed(444, "onion", 96, &transcode::ONION);
pub static ONION3: Protocol = Protocol::fixed(445, "onion3", 296, &transcode::ONION3);
pub static TLS: Protocol = Protocol::zero(448, "tls");
pub static SNI: Protocol = Protocol::variable(449, "sni", &transcode::UTF8);
pub static NOISE: Protocol = Protocol::zero(454, "noise");
pub static QUIC: Protocol = Protocol::zero(460, "quic");
pub static QUIC_V1: Protocol = Protocol::zero(461, "quic-v1");
pub static WEBTRANSPORT: Protocol = Protocol::zero(465, "webtransport");
pub static WS: Protocol = Protocol::zero(477, "ws");
pub static WSS: Protocol = Protocol::zero(478, "wss");
pub static P2P_WEBSOCKET_STAR: Protocol = Protocol::zero(479, "p2p-websocket-star");
pub static HTTP: Protocol = Protocol::zero(480, "http");
pub static MEMORY: Protocol = Protocol::fixed(777, "memory", 64, &transcode::U64);

// Earlier entries win code lookups, so `p2p` must precede `ipfs`.
static PROTOCOLS: &[&Protocol] = &[
    &IP4,
    &TCP,
    &DCCP,
    &IP6,
    &IP6ZONE,
    &DNS,
    &DNS4,
    &DNS6,
    &DNSADDR,
    &SCTP,
    &UDP,
    &P2P_WEBRTC_STAR,
    &P2P_WEBRTC_DIRECT,
    &WEBRTC_DIRECT,
    &WEBRTC,
    &P2P_CIRCUIT,
    &UDT,
    &UTP,
    &UNIX,
    &P2P,
    &IPFS,
    &HTTPS,
    &ONION,
    &ONION3,
    &TLS,
    &SNI,
    &NOISE,
    &QUIC,
    &QUIC_V1,
    &WEBTRANSPORT,
    &WS,
    &WSS,
    &P2P_WEBSOCKET_STAR,
    &HTTP,
    &MEMORY,
];

struct Registry {
    by_code: HashMap<u64, &'static Protocol>,
    by_name: HashMap<&'static str, &'static Protocol>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut by_code = HashMap::with_capacity(PROTOCOLS.len());
    let mut by_name = HashMap::with_capacity(PROTOCOLS.len());
    for &protocol in PROTOCOLS {
        by_code.entry(protocol.code).or_insert(protocol);
        by_name.insert(protocol.name, protocol);
    }
    Registry { by_code, by_name }
});

/// Returns every registered protocol, including legacy names.
pub fn all() -> &'static [&'static Protocol] {
    PROTOCOLS
}

/// Whether `token` is the name of a registered protocol.
pub fn is_known(token: &str) -> bool {
    REGISTRY.by_name.contains_key(token)
}
