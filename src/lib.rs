// cargo watch -x 'fmt' -x 'run'  // 'run -- -i 192.168.1.10/24 -s 26'

//! IPv4 subnet calculator.
//!
//! Parses an address with an optional prefix or netmask, derives its network
//! metadata and optionally splits it into subnets or widens it to a supernet.
//!
//! # Examples
//! ```
//! use subnet_wizard::{calculate, models::PrefixLength, processing::PartitionResult};
//! let calc = calculate("192.168.0.0/24", Some("26"), PrefixLength::DEFAULT).unwrap();
//! assert_eq!(calc.report.usable_host_count, 254);
//! match calc.partition {
//!     Some(PartitionResult::Subnets(set)) => assert_eq!(set.len(), 4),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

pub use error::{ParseError, PartitionError, WizardError};

use models::{NetworkReport, PrefixLength};
use processing::PartitionResult;

/// Base report plus the optional re-partition of that network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub report: NetworkReport,
    pub partition: Option<PartitionResult>,
}

/// Compute everything for an address token and an optional netmask token.
///
/// `prefix_token` is parsed with [`parser::parse_prefix_token`], so `"0"` is
/// refused. Nothing is returned unless every step succeeds.
pub fn calculate(
    address: &str,
    prefix_token: Option<&str>,
    default_prefix: PrefixLength,
) -> Result<Calculation, WizardError> {
    let network = parser::parse(address, default_prefix)?;
    let target = prefix_token.map(parser::parse_prefix_token).transpose()?;

    let report = processing::compute_report(network, network.addr);
    let partition = match target {
        Some(prefix) => Some(processing::partition(network, prefix.bits())?),
        None => None,
    };
    log::debug!("calculate({address:?}, {prefix_token:?}) = {}", report.network());

    Ok(Calculation { report, partition })
}
