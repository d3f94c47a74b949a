//! Address-space computation.
//!
//! This module contains the arithmetic on parsed networks:
//! - [`compute`] - Network metadata (addresses, masks, class, host range)
//! - [`partition`] - Subnetting and supernetting of a base network

mod compute;
mod partition;

// Re-export public functions
pub use compute::{address_class, compute_report, is_private, usable_hosts};
pub use partition::{
    hosts_per_network, partition, PartitionResult, SubnetSet, Subnets, Supernet,
};
