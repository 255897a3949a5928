//! Error types for address operations

use thiserror::Error;

/// Error type for address operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid format: {0}")]
    InvalidFormat(&'static str),
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),
    #[error("no segment uses protocol: {0}")]
    UnknownCodec(&'static str),
    #[error("invalid value for {protocol}: {reason}")]
    InvalidValue {
        protocol: &'static str,
        reason: String,
    },
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
}

impl Error {
    /// Shorthand for an [`Error::InvalidValue`] on the named protocol.
    pub(crate) fn invalid_value(protocol: &'static str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            protocol,
            reason: reason.to_string(),
        }
    }
}
