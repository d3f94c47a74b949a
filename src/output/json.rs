//! JSON output.

use crate::models::{Network, NetworkReport, PrefixLength};
use crate::processing::{PartitionResult, SubnetSet};
use crate::Calculation;
use serde::{Serialize, Serializer};
use std::io::Write;
use std::net::Ipv4Addr;

#[derive(Serialize, Debug)]
pub struct JsonOutput<'a> {
    pub report: &'a NetworkReport,
    pub partition: Option<JsonPartition<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum JsonPartition<'a> {
    Subnets {
        prefix: PrefixLength,
        netmask: Ipv4Addr,
        wildcard_mask: Ipv4Addr,
        hosts_per_network: i64,
        count: u64,
        /// Set when `subnets` holds fewer entries than `count`.
        truncated: bool,
        subnets: SubnetRows,
    },
    Supernet {
        network: Network,
        hosts_per_network: i64,
        first_address: Ipv4Addr,
        second_to_last_address: Ipv4Addr,
        report: &'a NetworkReport,
    },
}

/// The first `limit` children of a [`SubnetSet`], serialized as a sequence.
///
/// Reports are computed one at a time while the serializer writes them.
#[derive(Debug, Clone, Copy)]
pub struct SubnetRows {
    set: SubnetSet,
    limit: usize,
}

impl SubnetRows {
    /// Rows for `set`, at most `max_rows` of them (0 = all).
    pub fn new(set: SubnetSet, max_rows: usize) -> SubnetRows {
        let limit = if max_rows == 0 { usize::MAX } else { max_rows };
        SubnetRows { set, limit }
    }

    /// Number of rows that will be written.
    pub fn len(&self) -> u64 {
        self.set.len().min(self.limit as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for SubnetRows {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.set.reports().take(self.limit))
    }
}

impl<'a> JsonOutput<'a> {
    /// View of `calculation` listing at most `max_rows` subnets (0 = all).
    pub fn new(calculation: &'a Calculation, max_rows: usize) -> JsonOutput<'a> {
        let partition = match &calculation.partition {
            Some(PartitionResult::Subnets(set)) => {
                let subnets = SubnetRows::new(*set, max_rows);
                Some(JsonPartition::Subnets {
                    prefix: set.prefix(),
                    netmask: set.netmask(),
                    wildcard_mask: set.wildcard_mask(),
                    hosts_per_network: set.hosts_per_network(),
                    count: set.len(),
                    truncated: subnets.len() < set.len(),
                    subnets,
                })
            }
            Some(PartitionResult::Supernet(s)) => Some(JsonPartition::Supernet {
                network: s.network,
                hosts_per_network: s.hosts_per_network(),
                first_address: s.first_address,
                second_to_last_address: s.second_to_last_address,
                report: &s.report,
            }),
            Some(PartitionResult::Unchanged(_)) | None => None,
        };

        JsonOutput {
            report: &calculation.report,
            partition,
        }
    }
}

/// Write `calculation` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(
    out: &mut W,
    calculation: &Calculation,
    max_rows: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = JsonOutput::new(calculation, max_rows);
    serde_json::to_writer_pretty(&mut *out, &output)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    writeln!(out)?;
    Ok(())
}
