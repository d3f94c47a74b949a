//! Subnetting and supernetting.
//!
//! Re-partitions a base network to a target prefix length: a finer prefix
//! splits it into child subnets, a coarser one yields the enclosing supernet.
//! Child subnets are produced lazily since a /0 split to /32 has 2^32 members.

use super::compute::compute_report;
use crate::error::PartitionError;
use crate::models::{ip_after_subnet, Network, NetworkReport, PrefixLength};
use std::cmp::Ordering;
use std::net::Ipv4Addr;

/// Outcome of [`partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionResult {
    /// Target equals the base prefix; there is nothing to partition.
    Unchanged(Network),
    Subnets(SubnetSet),
    Supernet(Supernet),
}

impl PartitionResult {
    pub fn target_prefix(&self) -> PrefixLength {
        match self {
            PartitionResult::Unchanged(net) => net.prefix,
            PartitionResult::Subnets(set) => set.prefix(),
            PartitionResult::Supernet(supernet) => supernet.network.prefix,
        }
    }
}

/// All children of `base` at a finer prefix, in increasing address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetSet {
    base: Network,
    prefix: PrefixLength,
}

impl SubnetSet {
    /// The base network, host bits cleared.
    pub fn base(&self) -> Network {
        self.base
    }

    pub fn prefix(&self) -> PrefixLength {
        self.prefix
    }

    /// Number of child subnets, `2^(target - base)`.
    pub fn len(&self) -> u64 {
        1u64 << (self.prefix.bits() - self.base.prefix.bits())
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Network::new(self.base.addr, self.prefix).netmask()
    }

    pub fn wildcard_mask(&self) -> Ipv4Addr {
        Network::new(self.base.addr, self.prefix).wildcard_mask()
    }

    /// Hosts per child as `2^(32 - target) - 2`, negative for /32.
    pub fn hosts_per_network(&self) -> i64 {
        hosts_per_network(self.prefix)
    }

    pub fn iter(&self) -> Subnets {
        Subnets {
            next: Some(self.base.addr),
            remaining: self.len(),
            prefix: self.prefix,
        }
    }

    /// One report per child, computed as the iterator advances.
    pub fn reports(&self) -> impl Iterator<Item = NetworkReport> {
        self.iter().map(|net| compute_report(net, net.addr))
    }
}

impl IntoIterator for &SubnetSet {
    type Item = Network;
    type IntoIter = Subnets;

    fn into_iter(self) -> Subnets {
        self.iter()
    }
}

/// Lazy iterator over the children of a [`SubnetSet`].
#[derive(Debug, Clone)]
pub struct Subnets {
    next: Option<Ipv4Addr>,
    remaining: u64,
    prefix: PrefixLength,
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        if self.remaining == 0 {
            return None;
        }
        let addr = self.next?;
        self.remaining -= 1;
        self.next = ip_after_subnet(addr, self.prefix);
        Some(Network::new(addr, self.prefix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// The enclosing block of `base` at a coarser prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supernet {
    pub network: Network,
    pub report: NetworkReport,
    /// First address of the supernet, shown as the start of its host range.
    pub first_address: Ipv4Addr,
    /// The address just below the broadcast, shown as the end of its host range.
    pub second_to_last_address: Ipv4Addr,
}

impl Supernet {
    /// Hosts in the supernet as `2^(32 - target) - 2`.
    pub fn hosts_per_network(&self) -> i64 {
        hosts_per_network(self.network.prefix)
    }
}

/// Re-partition `base` to the raw target prefix `target`.
///
/// # Examples
/// ```
/// use subnet_wizard::processing::{partition, PartitionResult};
/// let base = "192.168.1.0/24".parse().unwrap();
/// match partition(base, 23).unwrap() {
///     PartitionResult::Supernet(s) => assert_eq!(s.network.to_string(), "192.168.0.0/23"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn partition(base: Network, target: u8) -> Result<PartitionResult, PartitionError> {
    let target = PrefixLength::try_from(target).map_err(|e| PartitionError::PrefixOutOfRange(e.0))?;
    let base = base.normalized();
    log::debug!("partition({base}, /{target})");

    let result = match target.cmp(&base.prefix) {
        Ordering::Equal => PartitionResult::Unchanged(base),
        Ordering::Greater => PartitionResult::Subnets(SubnetSet {
            base,
            prefix: target,
        }),
        Ordering::Less => PartitionResult::Supernet(supernet(base, target)),
    };
    Ok(result)
}

/// Hosts per block as `2^(32 - prefix) - 2`, unclamped.
pub fn hosts_per_network(prefix: PrefixLength) -> i64 {
    prefix.total_addresses() as i64 - 2
}

fn supernet(base: Network, target: PrefixLength) -> Supernet {
    let network = Network::new(base.network_address(), target).normalized();
    let report = compute_report(network, network.addr);
    // target is coarser than base, so the block holds at least two addresses
    let second_to_last_address = Ipv4Addr::from(u32::from(report.broadcast_address) - 1);
    log::trace!("supernet({base}) = {network}");

    Supernet {
        network,
        first_address: report.network_address,
        second_to_last_address,
        report,
    }
}
