//! Limits applied when decoding binary addresses.

/// Suggested upper bound on a variable-length payload from an untrusted peer, in bytes.
pub const UNTRUSTED_MAX_VALUE_LEN: usize = 8192;

/// Suggested upper bound on the number of segments in an address from an untrusted peer.
pub const UNTRUSTED_MAX_SEGMENTS: usize = 256;

/// Configuration for [crate::codec::Read::read_cfg] on segments and addresses.
///
/// The default places no limit on what is read, so every address that encodes also decodes.
/// Use [Config::untrusted] (or explicit limits) when reading bytes from the network.
///
/// # Examples
///
/// ```
/// use multiaddr::{Config, Decode, Error, Multiaddr};
///
/// // `/unix/tmp/socket` carries a 10-byte path
/// let bytes = [0x90, 0x03, 0x0a, b't', b'm', b'p', b'/', b's', b'o', b'c', b'k', b'e', b't'];
/// assert!(Multiaddr::decode_cfg(&bytes[..], &Config::default()).is_ok());
/// assert!(Multiaddr::decode_cfg(&bytes[..], &Config::untrusted()).is_ok());
///
/// let cfg = Config { max_value_len: 4, ..Config::default() };
/// assert_eq!(
///     Multiaddr::decode_cfg(&bytes[..], &cfg),
///     Err(Error::LengthExceeded(10, 4))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Largest length prefix accepted for a variable-length payload.
    pub max_value_len: usize,

    /// Largest number of segments accepted in one address.
    pub max_segments: usize,
}

impl Config {
    /// Returns a config with no limits.
    pub const fn unbounded() -> Self {
        Self {
            max_value_len: usize::MAX,
            max_segments: usize::MAX,
        }
    }

    /// Returns a config bounding allocation on input from an untrusted source.
    pub const fn untrusted() -> Self {
        Self {
            max_value_len: UNTRUSTED_MAX_VALUE_LEN,
            max_segments: UNTRUSTED_MAX_SEGMENTS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::unbounded()
    }
}
