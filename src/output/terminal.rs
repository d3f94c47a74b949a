//! Terminal output.
//!
//! Renders the base report and the subnet/supernet tables as aligned text.

use crate::models::NetworkReport;
use crate::processing::{PartitionResult, SubnetSet, Supernet};
use crate::Calculation;
use colored::Colorize;
use itertools::Itertools;
use std::io::{self, Write};
use std::net::Ipv4Addr;

/// Width of the `Label:` column.
const LABEL_WIDTH: usize = 24;
/// Width of the host range column, `start - end`.
const RANGE_WIDTH: usize = 33;

/// Format a count with thousands separators.
///
/// # Examples
/// ```
/// use subnet_wizard::output::format_thousands;
/// assert_eq!(format_thousands(4294967294), "4,294,967,294");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits: Vec<char> = n.to_string().chars().collect();
    digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",")
}

/// Print the banner shown before prompting.
pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "SubnetWizard - IPv4 subnet calculator".bold())
}

/// Print the base report and, when present, the partition breakdown.
pub fn write_calculation<W: Write>(
    out: &mut W,
    calculation: &Calculation,
    max_rows: usize,
) -> io::Result<()> {
    write_report(out, &calculation.report)?;
    match &calculation.partition {
        Some(PartitionResult::Subnets(set)) => write_subnets(out, set, max_rows),
        Some(PartitionResult::Supernet(supernet)) => write_supernet(out, supernet),
        Some(PartitionResult::Unchanged(_)) | None => Ok(()),
    }
}

/// Print the metadata of one network, one `Label: value` per line.
pub fn write_report<W: Write>(out: &mut W, r: &NetworkReport) -> io::Result<()> {
    let usable_range = match r.host_range() {
        Some((first, last)) => format!("{first} - {last}"),
        None => "NA".to_string(),
    };
    let private = if r.is_private { "True" } else { "False" };

    write_field(out, "IP Address", r.address)?;
    write_field(out, "IP Address (bin)", r.address_bin())?;
    write_field(out, "IP Class", r.address_class)?;
    write_field(out, "Network Address", r.network_address)?;
    write_field(out, "Network Address (bin)", r.network_address_bin())?;
    write_field(out, "Netmask", r.netmask)?;
    write_field(out, "Netmask (bin)", r.netmask_bin())?;
    write_field(out, "CIDR Notation", format!("/{}", r.prefix))?;
    write_field(out, "Broadcast Address", r.broadcast_address)?;
    write_field(out, "Usable IP Range", usable_range)?;
    write_field(out, "Number of Hosts", format_thousands(r.total_addresses))?;
    write_field(out, "Number of Usable Hosts", format_thousands(r.usable_host_count))?;
    write_field(out, "Wildcard Mask", r.wildcard_mask)?;
    write_field(out, "Private IP", private)?;
    writeln!(out)
}

/// Print the subnet summary and up to `max_rows` rows, 0 meaning all.
pub fn write_subnets<W: Write>(out: &mut W, set: &SubnetSet, max_rows: usize) -> io::Result<()> {
    writeln!(out, "{}\n", "Subnetted Network Details:".bold())?;
    write_field(out, "Netmask", set.netmask())?;
    write_field(out, "Wildcard Mask", set.wildcard_mask())?;
    write_field(out, "CIDR Notation", format!("/{}", set.prefix()))?;
    write_field(
        out,
        "Hosts per network",
        format_thousands(set.hosts_per_network().max(0) as u64),
    )?;

    // single addresses, nothing to tabulate
    if set.prefix().bits() == 32 {
        return Ok(());
    }

    writeln!(out)?;
    write_table_header(out)?;
    let limit = if max_rows == 0 { usize::MAX } else { max_rows };
    for report in set.reports().take(limit) {
        write_row(out, report.network_address, report.host_range(), report.broadcast_address)?;
    }

    let omitted = set.len().saturating_sub(limit as u64);
    if omitted > 0 {
        log::info!("Subnet listing cut at {limit} of {} rows", set.len());
        writeln!(
            out,
            "#{}# {} more subnets not shown, use --limit 0 to list all",
            "NOTE".on_red(),
            format_thousands(omitted)
        )?;
    }
    writeln!(out)
}

/// Print the supernet summary and its single table row.
pub fn write_supernet<W: Write>(out: &mut W, supernet: &Supernet) -> io::Result<()> {
    let r = &supernet.report;
    writeln!(out, "{}\n", "Supernetted Network Details:".bold())?;
    write_field(out, "Netmask", r.netmask)?;
    write_field(out, "Wildcard Mask", r.wildcard_mask)?;
    write_field(out, "CIDR Notation", format!("/{}", r.prefix))?;
    write_field(
        out,
        "Hosts/Network",
        format_thousands(supernet.hosts_per_network().max(0) as u64),
    )?;

    writeln!(out)?;
    write_table_header(out)?;
    write_row(
        out,
        r.network_address,
        Some((supernet.first_address, supernet.second_to_last_address)),
        r.broadcast_address,
    )?;
    writeln!(out)
}

fn write_field<W: Write, T: std::fmt::Display>(out: &mut W, label: &str, value: T) -> io::Result<()> {
    let label = format!("{label}:");
    writeln!(out, "{label:<LABEL_WIDTH$}{value}")
}

fn write_table_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<15} | {:^RANGE_WIDTH$} | {:<15}",
        "Network Address", "Host Range", "Broadcast Address"
    )?;
    writeln!(out, "{}", "-".repeat(15 + RANGE_WIDTH + 15 + 6))
}

fn write_row<W: Write>(
    out: &mut W,
    network: Ipv4Addr,
    range: Option<(Ipv4Addr, Ipv4Addr)>,
    broadcast: Ipv4Addr,
) -> io::Result<()> {
    let range = match range {
        Some((first, last)) => format!("{:<15} - {:<15}", first.to_string(), last.to_string()),
        None => format!("{:^RANGE_WIDTH$}", "NA"),
    };
    writeln!(
        out,
        "{:<15} | {range} | {:<15}",
        network.to_string(),
        broadcast.to_string()
    )
}
