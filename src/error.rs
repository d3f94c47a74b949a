//! Error types returned by the parser and the partition engine.
//!
//! Every failure is recoverable by the caller; nothing in the library exits the
//! process. The CLI decides whether to re-prompt or abort.

/// Failure to parse an address, a prefix suffix or a standalone netmask token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),
    #[error("invalid prefix or netmask: {0:?}")]
    InvalidPrefix(String),
    #[error("a netmask of 0 is not a valid partition target")]
    ZeroPrefixDisallowed,
}

/// Failure to re-partition a network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("target prefix /{0} is outside 0..=32")]
    PrefixOutOfRange(u8),
}

/// Any error produced by [`crate::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
}
