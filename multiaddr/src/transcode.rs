//! Conversion between the string and binary forms of segment values.
//!
//! Each protocol points at one [Transcoder]. Failures are reported as a bare reason and wrapped
//! with the protocol name by the caller.

use data_encoding::BASE32_NOPAD;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Length of a v2 onion service identifier, in bytes.
const ONION_HASH_LEN: usize = 10;

/// Length of a v3 onion service public key (plus checksum and version), in bytes.
const ONION3_HASH_LEN: usize = 35;

/// A pair of conversions between the string and binary forms of a value.
pub(crate) struct Transcoder {
    pub(crate) to_bytes: fn(&str) -> Result<Vec<u8>, String>,
    pub(crate) to_string: fn(&[u8]) -> Result<String, String>,
}

/// Protocols that never carry a value.
pub(crate) static NONE: Transcoder = Transcoder {
    to_bytes: |_| Err("protocol does not take a value".into()),
    to_string: |_| Err("protocol does not take a value".into()),
};

/// Dotted-decimal IPv4 addresses.
pub(crate) static IP4: Transcoder = Transcoder {
    to_bytes: |s| {
        let ip: Ipv4Addr = s.parse().map_err(|err| format!("{err}: {s}"))?;
        Ok(ip.octets().to_vec())
    },
    to_string: |b| {
        let octets: [u8; 4] = b.try_into().map_err(|_| length_mismatch(4, b.len()))?;
        Ok(Ipv4Addr::from(octets).to_string())
    },
};

/// Colon-hex IPv6 addresses.
pub(crate) static IP6: Transcoder = Transcoder {
    to_bytes: |s| {
        let ip: Ipv6Addr = s.parse().map_err(|err| format!("{err}: {s}"))?;
        Ok(ip.octets().to_vec())
    },
    to_string: |b| {
        let octets: [u8; 16] = b.try_into().map_err(|_| length_mismatch(16, b.len()))?;
        Ok(Ipv6Addr::from(octets).to_string())
    },
};

/// Decimal port numbers, written as 2 big-endian bytes.
pub(crate) static PORT: Transcoder = Transcoder {
    to_bytes: |s| Ok(parse_port(s)?.to_be_bytes().to_vec()),
    to_string: |b| {
        let bytes: [u8; 2] = b.try_into().map_err(|_| length_mismatch(2, b.len()))?;
        Ok(u16::from_be_bytes(bytes).to_string())
    },
};

/// Decimal 64-bit identifiers, written as 8 big-endian bytes.
pub(crate) static U64: Transcoder = Transcoder {
    to_bytes: |s| {
        if !is_decimal(s) {
            return Err(format!("not a decimal number: {s}"));
        }
        let value: u64 = s.parse().map_err(|err| format!("{err}: {s}"))?;
        Ok(value.to_be_bytes().to_vec())
    },
    to_string: |b| {
        let bytes: [u8; 8] = b.try_into().map_err(|_| length_mismatch(8, b.len()))?;
        Ok(u64::from_be_bytes(bytes).to_string())
    },
};

/// Text carried verbatim (host names, filesystem paths).
pub(crate) static UTF8: Transcoder = Transcoder {
    to_bytes: |s| Ok(s.as_bytes().to_vec()),
    to_string: |b| String::from_utf8(b.to_vec()).map_err(|err| err.to_string()),
};

/// Peer identities, written in base58btc.
pub(crate) static BASE58: Transcoder = Transcoder {
    to_bytes: |s| {
        bs58::decode(s)
            .into_vec()
            .map_err(|err| format!("{err}: {s}"))
    },
    to_string: |b| Ok(bs58::encode(b).into_string()),
};

/// Tor v2 onion services: `<16 base32 chars>:<port>`.
pub(crate) static ONION: Transcoder = Transcoder {
    to_bytes: |s| onion_to_bytes(s, ONION_HASH_LEN),
    to_string: |b| onion_to_string(b, ONION_HASH_LEN),
};

/// Tor v3 onion services: `<56 base32 chars>:<port>`.
pub(crate) static ONION3: Transcoder = Transcoder {
    to_bytes: |s| onion_to_bytes(s, ONION3_HASH_LEN),
    to_string: |b| onion_to_string(b, ONION3_HASH_LEN),
};

fn length_mismatch(expected: usize, found: usize) -> String {
    format!("expected {expected} bytes, found {found}")
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_port(s: &str) -> Result<u16, String> {
    if !is_decimal(s) {
        return Err(format!("not a port number: {s}"));
    }
    s.parse().map_err(|err| format!("{err}: {s}"))
}

fn onion_to_bytes(s: &str, hash_len: usize) -> Result<Vec<u8>, String> {
    let (host, port) = s
        .split_once(':')
        .ok_or_else(|| format!("missing port: {s}"))?;
    let mut bytes = BASE32_NOPAD
        .decode(host.to_ascii_uppercase().as_bytes())
        .map_err(|err| format!("{err}: {host}"))?;
    if bytes.len() != hash_len {
        return Err(length_mismatch(hash_len, bytes.len()));
    }
    let port = parse_port(port)?;
    if port == 0 {
        return Err("port must be non-zero".into());
    }
    bytes.extend_from_slice(&port.to_be_bytes());
    Ok(bytes)
}

fn onion_to_string(b: &[u8], hash_len: usize) -> Result<String, String> {
    if b.len() != hash_len + 2 {
        return Err(length_mismatch(hash_len + 2, b.len()));
    }
    let (hash, port) = b.split_at(hash_len);
    let port = u16::from_be_bytes([port[0], port[1]]);
    if port == 0 {
        return Err("port must be non-zero".into());
    }
    Ok(format!(
        "{}:{port}",
        BASE32_NOPAD.encode(hash).to_ascii_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn round_trip(transcoder: &Transcoder, s: &str) -> String {
        let bytes = (transcoder.to_bytes)(s).unwrap();
        (transcoder.to_string)(&bytes).unwrap()
    }

    #[test]
    fn test_ip4() {
        assert_eq!((IP4.to_bytes)("127.0.0.1").unwrap(), vec![127, 0, 0, 1]);
        assert_eq!((IP4.to_string)(&[10, 0, 0, 7]).unwrap(), "10.0.0.7");
        assert!((IP4.to_bytes)("256.0.0.1").is_err());
        assert!((IP4.to_bytes)("1.2.3").is_err());
        assert!((IP4.to_string)(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_ip6_normalizes() {
        assert_eq!(round_trip(&IP6, "0:0:0:0:0:0:0:1"), "::1");
        assert_eq!(round_trip(&IP6, "2001:db8::ff00:42:8329"), "2001:db8::ff00:42:8329");
        assert!((IP6.to_bytes)("2001:db8::g").is_err());
    }

    #[test_case("9090", Some(&[0x23, 0x82]); "port")]
    #[test_case("0", Some(&[0x00, 0x00]); "zero")]
    #[test_case("65535", Some(&[0xFF, 0xFF]); "max")]
    #[test_case("65536", None; "overflow")]
    #[test_case("+80", None; "sign")]
    #[test_case("http", None; "name")]
    #[test_case("", None; "empty")]
    fn test_port(input: &str, expected: Option<&[u8]>) {
        match expected {
            Some(bytes) => assert_eq!((PORT.to_bytes)(input).unwrap(), bytes),
            None => assert!((PORT.to_bytes)(input).is_err()),
        }
    }

    #[test]
    fn test_u64() {
        assert_eq!(round_trip(&U64, "18446744073709551615"), "18446744073709551615");
        assert_eq!((U64.to_bytes)("1").unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 1]);
        assert!((U64.to_bytes)("-1").is_err());
    }

    #[test]
    fn test_utf8() {
        assert_eq!(round_trip(&UTF8, "tmp/socket"), "tmp/socket");
        assert!((UTF8.to_string)(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn test_base58() {
        let peer = "QmcgpsyWgH8Y8ajJz1Cu72KnS5uo2Aa2LpzU7kinSupNKC";
        let bytes = (BASE58.to_bytes)(peer).unwrap();
        assert_eq!(bytes.len(), 34);
        assert_eq!(&bytes[..2], &[0x12, 0x20]);
        assert_eq!((BASE58.to_string)(&bytes).unwrap(), peer);

        // '0', 'O', 'I' and 'l' are not in the alphabet
        assert!((BASE58.to_bytes)("Qm0").is_err());
    }

    #[test]
    fn test_onion() {
        let bytes = (ONION.to_bytes)("timaq4ygg2iegci7:1234").unwrap();
        assert_eq!(bytes.len(), ONION_HASH_LEN + 2);
        assert_eq!(&bytes[ONION_HASH_LEN..], &1234u16.to_be_bytes());
        assert_eq!((ONION.to_string)(&bytes).unwrap(), "timaq4ygg2iegci7:1234");

        assert!((ONION.to_bytes)("timaq4ygg2iegci7").is_err());
        assert!((ONION.to_bytes)("timaq4ygg2iegci7:0").is_err());
        assert!((ONION.to_bytes)("timaq4ygg2iegci:80").is_err());
    }

    #[test]
    fn test_onion3() {
        let host = "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd";
        let value = format!("{host}:1234");
        let bytes = (ONION3.to_bytes)(&value).unwrap();
        assert_eq!(bytes.len(), ONION3_HASH_LEN + 2);
        assert_eq!((ONION3.to_string)(&bytes).unwrap(), value);
    }

    #[test]
    fn test_none() {
        assert!((NONE.to_bytes)("").is_err());
        assert!((NONE.to_string)(&[]).is_err());
    }
}
