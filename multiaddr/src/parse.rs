//! Tokenizer for the string form of an address.
//!
//! The string form is a `/`-separated list of protocol names, each followed by the tokens of
//! its value. A value runs until the next token that names a protocol, which lets filesystem
//! paths keep their embedded `/` (`/unix/tmp/socket` has the single value `tmp/socket`).

use crate::{
    protocol::{self, Protocol},
    Error, Segment,
};
use tracing::trace;

/// Splits `s` into segments.
///
/// Values are not checked here: the result may still fail to encode.
pub(crate) fn parse(s: &str) -> Result<Vec<Segment>, Error> {
    if s.is_empty() {
        return Err(Error::InvalidFormat("empty address"));
    }
    let rest = s
        .strip_prefix('/')
        .ok_or(Error::InvalidFormat("address must start with '/'"))?;
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut tokens = rest.split('/').peekable();
    while let Some(token) = tokens.next() {
        if token.is_empty() {
            return Err(Error::InvalidFormat("empty protocol name"));
        }

        // Tokens that do not name a protocol are dropped rather than rejected.
        if !protocol::is_known(token) {
            trace!(token, "skipping unrecognized token");
            continue;
        }
        let protocol =
            Protocol::from_name(token).ok_or_else(|| Error::UnknownProtocol(token.to_string()))?;

        let mut parts = Vec::new();
        while let Some(part) = tokens.next_if(|next| !protocol::is_known(next)) {
            parts.push(part);
        }
        let value = (!parts.is_empty()).then(|| parts.join("/"));
        segments.push(Segment::from_parts(protocol, value));
    }
    Ok(segments)
}
