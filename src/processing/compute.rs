//! Network metadata derivation.
//!
//! Computes network and broadcast addresses, masks, classful category and the
//! usable host range of a [`Network`].

use crate::models::{AddressClass, Network, NetworkReport, PrefixLength};
use std::net::Ipv4Addr;

/// Private ranges as (network, netmask): 10/8, 172.16/12 and 192.168/16.
const PRIVATE_RANGES: [(Ipv4Addr, Ipv4Addr); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(255, 0, 0, 0)),
    (Ipv4Addr::new(172, 16, 0, 0), Ipv4Addr::new(255, 240, 0, 0)),
    (Ipv4Addr::new(192, 168, 0, 0), Ipv4Addr::new(255, 255, 0, 0)),
];

/// Build the report for `net`.
///
/// `original_address` is what the user typed and decides the address class;
/// everything else comes from the masked network address.
pub fn compute_report(net: Network, original_address: Ipv4Addr) -> NetworkReport {
    let network_address = net.network_address();
    let broadcast_address = net.broadcast_address();
    let usable_host_count = usable_hosts(net.prefix);

    let (first_usable_host, last_usable_host) = if usable_host_count > 0 {
        (
            Some(Ipv4Addr::from(u32::from(network_address) + 1)),
            Some(Ipv4Addr::from(u32::from(broadcast_address) - 1)),
        )
    } else {
        (None, None)
    };

    log::trace!(
        "compute_report({net}) network={network_address} broadcast={broadcast_address} usable={usable_host_count}"
    );

    NetworkReport {
        address: original_address,
        prefix: net.prefix,
        network_address,
        broadcast_address,
        netmask: net.netmask(),
        wildcard_mask: net.wildcard_mask(),
        address_class: address_class(original_address),
        total_addresses: net.total_addresses(),
        usable_host_count,
        first_usable_host,
        last_usable_host,
        is_private: is_private(network_address),
    }
}

/// Classify by the first octet.
pub fn address_class(addr: Ipv4Addr) -> AddressClass {
    match addr.octets()[0] {
        0..=127 => AddressClass::A,
        128..=191 => AddressClass::B,
        192..=223 => AddressClass::C,
        224..=239 => AddressClass::D,
        240..=255 => AddressClass::E,
    }
}

/// True when `addr` lies in one of the RFC 1918 ranges.
pub fn is_private(addr: Ipv4Addr) -> bool {
    let bits = u32::from(addr);
    PRIVATE_RANGES
        .iter()
        .any(|&(range, mask)| bits & u32::from(mask) == u32::from(range))
}

/// Addresses left once the network and broadcast addresses are reserved.
///
/// Both are reserved for every prefix, /31 included, so /31 and /32 have none.
pub fn usable_hosts(prefix: PrefixLength) -> u64 {
    prefix.total_addresses().saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(cidr: &str) -> NetworkReport {
        let net: Network = cidr.parse().unwrap();
        compute_report(net, net.addr)
    }

    #[test]
    fn test_report_class_c() {
        let r = report("192.168.1.10/24");
        assert_eq!(r.address, Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(r.network_address, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(r.broadcast_address, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(r.netmask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(r.wildcard_mask, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(r.address_class.to_string(), "Class C");
        assert_eq!(r.total_addresses, 256);
        assert_eq!(r.usable_host_count, 254);
        assert_eq!(
            r.host_range(),
            Some((Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 254)))
        );
        assert!(r.is_private);
    }

    #[test]
    fn test_report_default_prefix() {
        let r = report("10.0.0.1");
        assert_eq!(r.network_address, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(r.broadcast_address, Ipv4Addr::new(10, 0, 0, 255));
        assert_eq!(r.address_class, AddressClass::A);
    }

    #[test]
    fn test_report_point_to_point_and_host() {
        let r = report("10.0.0.4/31");
        assert_eq!(r.total_addresses, 2);
        assert_eq!(r.usable_host_count, 0);
        assert_eq!(r.host_range(), None);

        let r = report("10.0.0.4/32");
        assert_eq!(r.total_addresses, 1);
        assert_eq!(r.usable_host_count, 0);
        assert_eq!(r.first_usable_host, None);
        assert_eq!(r.network_address, r.broadcast_address);

        let r = report("10.0.0.4/30");
        assert_eq!(r.usable_host_count, 2);
        assert_eq!(
            r.host_range(),
            Some((Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 0, 6)))
        );
    }

    #[test]
    fn test_report_whole_space() {
        let r = report("8.8.8.8/0");
        assert_eq!(r.network_address, Ipv4Addr::UNSPECIFIED);
        assert_eq!(r.broadcast_address, Ipv4Addr::BROADCAST);
        assert_eq!(r.total_addresses, 1u64 << 32);
        assert_eq!(r.usable_host_count, (1u64 << 32) - 2);
        assert!(!r.is_private, "0.0.0.0 is outside every private range");
    }

    #[test]
    fn test_class_uses_original_address() {
        // the typed address decides, not the masked network address
        let net: Network = "127.0.0.1/1".parse().unwrap();
        let r = compute_report(net, net.addr);
        assert_eq!(r.network_address, Ipv4Addr::UNSPECIFIED);
        assert_eq!(r.address_class, AddressClass::A);

        let net: Network = "223.1.1.1/1".parse().unwrap();
        let r = compute_report(net, net.addr);
        assert_eq!(r.network_address, Ipv4Addr::new(128, 0, 0, 0));
        assert_eq!(r.address_class, AddressClass::C);
    }

    #[test]
    fn test_address_class_boundaries() {
        assert_eq!(address_class(Ipv4Addr::new(0, 0, 0, 0)), AddressClass::A);
        assert_eq!(address_class(Ipv4Addr::new(127, 255, 255, 255)), AddressClass::A);
        assert_eq!(address_class(Ipv4Addr::new(128, 0, 0, 0)), AddressClass::B);
        assert_eq!(address_class(Ipv4Addr::new(191, 0, 0, 0)), AddressClass::B);
        assert_eq!(address_class(Ipv4Addr::new(192, 0, 0, 0)), AddressClass::C);
        assert_eq!(address_class(Ipv4Addr::new(223, 0, 0, 0)), AddressClass::C);
        assert_eq!(address_class(Ipv4Addr::new(224, 0, 0, 0)), AddressClass::D);
        assert_eq!(address_class(Ipv4Addr::new(239, 0, 0, 0)), AddressClass::D);
        assert_eq!(address_class(Ipv4Addr::new(240, 0, 0, 0)), AddressClass::E);
        assert_eq!(address_class(Ipv4Addr::BROADCAST), AddressClass::E);
    }

    #[test]
    fn test_is_private() {
        assert!(is_private(Ipv4Addr::new(10, 255, 0, 1)));
        assert!(is_private(Ipv4Addr::new(172, 16, 0, 0)));
        assert!(is_private(Ipv4Addr::new(172, 31, 255, 255)));
        assert!(!is_private(Ipv4Addr::new(172, 32, 0, 0)));
        assert!(!is_private(Ipv4Addr::new(172, 15, 255, 255)));
        assert!(is_private(Ipv4Addr::new(192, 168, 200, 1)));
        assert!(!is_private(Ipv4Addr::new(192, 169, 0, 0)));
        assert!(!is_private(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn test_usable_hosts() {
        let p = |bits: u8| PrefixLength::try_from(bits).unwrap();
        assert_eq!(usable_hosts(p(24)), 254);
        assert_eq!(usable_hosts(p(26)), 62);
        assert_eq!(usable_hosts(p(30)), 2);
        assert_eq!(usable_hosts(p(31)), 0);
        assert_eq!(usable_hosts(p(32)), 0);
    }
}
