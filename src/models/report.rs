//! Derived, read-only view of a network.

use super::ipv4::{to_binary, Network};
use super::prefix::PrefixLength;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Classful address category, decided by the first octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D",
            AddressClass::E => "E",
        };
        write!(f, "Class {letter}")
    }
}

/// Everything derived from one [`Network`].
///
/// Built by [`crate::processing::compute_report`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkReport {
    /// The address exactly as the caller supplied it, host bits included.
    pub address: Ipv4Addr,
    pub prefix: PrefixLength,
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub wildcard_mask: Ipv4Addr,
    pub address_class: AddressClass,
    pub total_addresses: u64,
    pub usable_host_count: u64,
    pub first_usable_host: Option<Ipv4Addr>,
    pub last_usable_host: Option<Ipv4Addr>,
    pub is_private: bool,
}

impl NetworkReport {
    /// The block this report describes, host bits cleared.
    pub fn network(&self) -> Network {
        Network::new(self.network_address, self.prefix)
    }

    /// First and last usable host, `None` for /31 and /32.
    pub fn host_range(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        self.first_usable_host.zip(self.last_usable_host)
    }

    pub fn address_bin(&self) -> String {
        to_binary(self.address)
    }

    pub fn network_address_bin(&self) -> String {
        to_binary(self.network_address)
    }

    pub fn netmask_bin(&self) -> String {
        to_binary(self.netmask)
    }
}
