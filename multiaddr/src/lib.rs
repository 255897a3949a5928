//! Encode, decode, and compose self-describing network addresses.
//!
//! # Overview
//!
//! A [Multiaddr] is an ordered list of [Segment]s, each pairing a [Protocol] with an optional
//! value: `/ip4/127.0.0.1/tcp/9090/p2p/QmPeer` is an IPv4 host, a TCP port, and a peer identity,
//! outermost first. Addresses have three interchangeable forms:
//! - the string form shown above,
//! - a compact binary form, where each segment is `varint(code)`, then `varint(len)` for
//!   variable-length protocols, then the value's bytes,
//! - the structured list of segments.
//!
//! The binary form needs no delimiters or header: each protocol's [protocol::Size] says how many
//! value bytes follow its code.
//!
//! # Validity
//!
//! Every [Multiaddr] returned by this crate encodes. Parsing a string checks each value against
//! its protocol (a port must be a decimal `u16`, an `ip4` value a dotted quad, and so on) and
//! stores it in canonical form, so any parsed address survives a trip through the binary form
//! unchanged. Decoding bytes is checked by construction.
//!
//! # Example
//!
//! ```
//! use multiaddr::{protocol, DecodeExt, Multiaddr};
//!
//! let base: Multiaddr = "/ip4/1.2.3.4/tcp/80".parse().unwrap();
//! let peer: Multiaddr = "/p2p/QmPeer".parse().unwrap();
//!
//! let full = base.encapsulate(&peer);
//! assert_eq!(full.to_string(), "/ip4/1.2.3.4/tcp/80/p2p/QmPeer");
//! assert_eq!(full.peer_id(), Some("QmPeer"));
//!
//! let host: Multiaddr = "/ip4/1.2.3.4".parse().unwrap();
//! assert_eq!(full.decapsulate_protocol(&protocol::TCP), host);
//!
//! let bytes = full.to_bytes().unwrap();
//! assert_eq!(Multiaddr::decode(bytes).unwrap(), full);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;
pub mod varint;

mod address;
mod parse;
mod segment;
mod transcode;

// Re-export main types and traits
pub use address::Multiaddr;
pub use codec::{Decode, DecodeExt, Encode, Read, Write};
pub use config::Config;
pub use error::Error;
pub use protocol::{Protocol, Size};
pub use segment::Segment;
