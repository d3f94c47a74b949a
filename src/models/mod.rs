//! Domain models for the subnet calculator.
//!
//! This module contains the value types used throughout the crate:
//! - [`PrefixLength`] - validated CIDR prefix length
//! - [`Network`] - IPv4 address with a prefix length
//! - [`NetworkReport`] and [`AddressClass`] - derived network metadata

mod ipv4;
mod prefix;
mod report;

// Re-export public types
pub use ipv4::{
    broadcast_addr, ip_after_subnet, netmask, network_addr, to_binary, wildcard_mask, Network,
};
pub use prefix::{InvalidPrefixLength, PrefixLength, MAX_LENGTH};
pub use report::{AddressClass, NetworkReport};
