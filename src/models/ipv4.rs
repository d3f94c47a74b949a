//! IPv4 network and bit-level address helpers.
//!
//! Provides [`Network`] for representing an address together with its prefix
//! length, along with the mask arithmetic everything else is built on.

use super::prefix::PrefixLength;
use crate::error::ParseError;
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_wizard::models::{netmask, PrefixLength};
/// let p = PrefixLength::try_from(24).unwrap();
/// assert_eq!(netmask(p), 0xFFFFFF00);
/// ```
pub fn netmask(prefix: PrefixLength) -> u32 {
    let right_len = prefix.host_bits();
    let all_bits = u32::MAX as u64;

    let mask = (all_bits >> right_len) << right_len;

    mask as u32
}

/// Host mask for a prefix, the bitwise complement of [`netmask`].
pub fn wildcard_mask(prefix: PrefixLength) -> u32 {
    !netmask(prefix)
}

/// Get the network address for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, prefix: PrefixLength) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & netmask(prefix))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, prefix: PrefixLength) -> Ipv4Addr {
    let mask = netmask(prefix);
    let network_bits = u32::from(addr) & mask;
    Ipv4Addr::from(network_bits | !mask)
}

/// Returns the first address following the block of size `prefix` that holds
/// `addr`, or `None` when that block ends at 255.255.255.255.
pub fn ip_after_subnet(addr: Ipv4Addr, prefix: PrefixLength) -> Option<Ipv4Addr> {
    let subnet_size = prefix.total_addresses();
    let network_bits = u32::from(network_addr(addr, prefix)) as u64;
    let next = network_bits + subnet_size;
    u32::try_from(next).ok().map(Ipv4Addr::from)
}

/// Render an address as four dot separated groups of eight bits.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use subnet_wizard::models::to_binary;
/// assert_eq!(
///     to_binary(Ipv4Addr::new(255, 255, 255, 0)),
///     "11111111.11111111.11111111.00000000"
/// );
/// ```
pub fn to_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|octet| format!("{octet:08b}"))
        .join(".")
}

/// IPv4 address with a prefix length.
///
/// `addr` may carry host bits; they are cleared by [`Network::network_address`].
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    /// The address as supplied.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: PrefixLength,
}

impl Network {
    pub fn new(addr: Ipv4Addr, prefix: PrefixLength) -> Network {
        Network { addr, prefix }
    }

    /// Same block with the host bits of `addr` cleared.
    pub fn normalized(&self) -> Network {
        Network {
            addr: self.network_address(),
            prefix: self.prefix,
        }
    }

    /// Get the lowest (network) address in the block.
    pub fn network_address(&self) -> Ipv4Addr {
        network_addr(self.addr, self.prefix)
    }

    /// Get the highest (broadcast) address in the block.
    pub fn broadcast_address(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.prefix)
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(netmask(self.prefix))
    }

    pub fn wildcard_mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(wildcard_mask(self.prefix))
    }

    pub fn total_addresses(&self) -> u64 {
        self.prefix.total_addresses()
    }
}

impl FromStr for Network {
    type Err = ParseError;

    /// Parse `A.B.C.D`, `A.B.C.D/N` or `A.B.C.D/M.M.M.M`, defaulting to /24.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s, PrefixLength::DEFAULT)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.prefix);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !s.contains('/') {
            return Err(de::Error::custom(format!("invalid CIDR format: {}", s)));
        }
        Network::from_str(&s).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_LENGTH;

    fn p(bits: u8) -> PrefixLength {
        PrefixLength::try_from(bits).unwrap()
    }

    #[test]
    fn test_netmask() {
        assert_eq!(netmask(p(0)), 0x00000000);
        assert_eq!(netmask(p(8)), 0xFF000000);
        assert_eq!(netmask(p(16)), 0xFFFF0000);
        assert_eq!(netmask(p(23)), 0xFFFFFE00);
        assert_eq!(netmask(p(24)), 0xFFFFFF00);
        assert_eq!(netmask(p(32)), 0xFFFFFFFF);
    }

    #[test]
    fn test_mask_and_wildcard_are_complements() {
        for bits in 0..=MAX_LENGTH {
            let mask = netmask(p(bits));
            let wildcard = wildcard_mask(p(bits));
            assert_eq!(mask & wildcard, 0, "overlap at /{bits}");
            assert_eq!(mask | wildcard, u32::MAX, "gap at /{bits}");
            assert_eq!(mask.leading_ones(), bits as u32);
        }
    }

    #[test]
    fn test_network_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(network_addr(ip, p(24)), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(network_addr(ip, p(16)), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(network_addr(ip, p(8)), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(network_addr(ip, p(32)), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(network_addr(ip, p(0)), Ipv4Addr::new(0, 0, 0, 0));
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(broadcast_addr(ip, p(24)), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(broadcast_addr(ip, p(16)), Ipv4Addr::new(192, 168, 255, 255));
        assert_eq!(broadcast_addr(ip, p(8)), Ipv4Addr::new(192, 255, 255, 255));
        assert_eq!(broadcast_addr(ip, p(32)), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(broadcast_addr(ip, p(0)), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_network_or_wildcard_is_broadcast() {
        let ip = Ipv4Addr::new(172, 20, 133, 77);
        for bits in 0..=MAX_LENGTH {
            let net = Network::new(ip, p(bits));
            let network_bits = u32::from(net.network_address());
            let host_bits = u32::from(net.wildcard_mask());
            assert_eq!(network_bits & host_bits, 0);
            assert_eq!(
                Ipv4Addr::from(network_bits | host_bits),
                net.broadcast_address()
            );
        }
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(ip_after_subnet(ip, p(24)), Some(Ipv4Addr::new(192, 168, 2, 0)));
        assert_eq!(ip_after_subnet(ip, p(16)), Some(Ipv4Addr::new(192, 169, 0, 0)));
        assert_eq!(ip_after_subnet(ip, p(8)), Some(Ipv4Addr::new(193, 0, 0, 0)));
        assert_eq!(ip_after_subnet(ip, p(32)), Some(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 255), p(24)), None);
        assert_eq!(ip_after_subnet(Ipv4Addr::UNSPECIFIED, p(0)), None);
    }

    #[test]
    fn test_to_binary() {
        assert_eq!(
            to_binary(Ipv4Addr::new(192, 168, 1, 10)),
            "11000000.10101000.00000001.00001010"
        );
        assert_eq!(
            to_binary(Ipv4Addr::UNSPECIFIED),
            "00000000.00000000.00000000.00000000"
        );
    }

    #[test]
    fn test_network_total_addresses() {
        let net: Network = "10.0.10.0/24".parse().unwrap();
        assert_eq!(net.total_addresses(), 256);
        let net: Network = "10.0.10.0/0".parse().unwrap();
        assert_eq!(net.total_addresses(), 1u64 << 32);
    }

    #[test]
    fn test_network_normalized_keeps_prefix() {
        let net: Network = "10.2.3.4/16".parse().unwrap();
        assert_eq!(net.addr, Ipv4Addr::new(10, 2, 3, 4));
        assert_eq!(net.normalized(), "10.2.0.0/16".parse().unwrap());
    }

    #[test]
    fn test_network_serde() {
        let net: Network = "10.1.1.0/28".parse().unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"10.1.1.0/28\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
        assert!(serde_json::from_str::<Network>("\"10.1.1.0\"").is_err());
        assert!(serde_json::from_str::<Network>("\"10.1.1.0/33\"").is_err());
    }

    #[test]
    fn test_network_cmp() {
        let ip1: Network = "10.0.0.1/24".parse().unwrap();
        let ip2: Network = "10.0.0.2/24".parse().unwrap();
        let ip3: Network = "10.0.0.1/24".parse().unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 >= ip3);
    }
}
