//! CIDR prefix length.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Number of leading one bits in a netmask, always within `0..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrefixLength(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid prefix length: {0}")]
pub struct InvalidPrefixLength(pub u8);

impl PrefixLength {
    pub const MIN: PrefixLength = PrefixLength(0);
    pub const MAX: PrefixLength = PrefixLength(MAX_LENGTH);

    /// Prefix length used when an address is given without a suffix.
    pub const DEFAULT: PrefixLength = PrefixLength(24);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Number of host bits, `32 - prefix`.
    pub fn host_bits(self) -> u8 {
        MAX_LENGTH - self.0
    }

    /// Number of addresses covered by a block of this size, `2^(32 - prefix)`.
    pub fn total_addresses(self) -> u64 {
        1u64 << self.host_bits()
    }
}

impl Default for PrefixLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for PrefixLength {
    type Error = InvalidPrefixLength;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=MAX_LENGTH => Ok(Self(value)),
            invalid => Err(InvalidPrefixLength(invalid)),
        }
    }
}

impl From<PrefixLength> for u8 {
    fn from(value: PrefixLength) -> Self {
        value.0
    }
}

impl fmt::Display for PrefixLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
