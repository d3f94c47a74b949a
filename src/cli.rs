//! Command line front end.
//!
//! Parses flags, prompts for whatever is missing and prints the result.

use crate::config::{Config, OutputFormat, DEFAULT_MAX_ROWS};
use crate::models::{Network, PrefixLength};
use crate::output;
use crate::parser;
use crate::processing::{compute_report, partition};
use crate::Calculation;
use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::{self, BufRead, Write};

/// Input used when the address prompt is answered with an empty line.
pub const DEFAULT_INTERACTIVE_INPUT: &str = "192.168.0.100/24";
pub const INVALID_IP_MSG: &str = "Invalid IP Address!";
pub const INVALID_NETMASK_MSG: &str = "Invalid Netmask!";

/// IPv4 subnet calculator with subnetting and supernetting.
#[derive(Parser, Debug)]
#[command(name = "subnet-wizard", version)]
pub struct Args {
    /// The IPv4 address to calculate, e.g. 192.168.0.100/24 or
    /// 10.0.0.1/255.255.255.0
    #[arg(short = 'i', value_name = "ADDRESS")]
    pub ip: Option<String>,

    /// The netmask to subnet or supernet to (optional)
    #[arg(short = 's', value_name = "NETMASK")]
    pub subnet: Option<String>,

    /// Never prompt; a missing -i is an error and a missing -s skips partitioning
    #[arg(short = 'n', long)]
    pub non_interactive: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Maximum subnet rows to print, 0 for no limit
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub limit: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Ask for an address until a valid one is entered.
///
/// An empty line selects [`DEFAULT_INTERACTIVE_INPUT`].
pub fn prompt_network<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_prefix: PrefixLength,
) -> io::Result<Network> {
    loop {
        write!(output, "Enter an IP Address: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an IP address was entered",
            ));
        }
        let line = match line.trim() {
            "" => DEFAULT_INTERACTIVE_INPUT,
            line => line,
        };

        match parser::parse(line, default_prefix) {
            Ok(network) => return Ok(network),
            Err(e) => {
                log::warn!("Rejected address input: {e}");
                writeln!(output, "{}", INVALID_IP_MSG.red())?;
            }
        }
    }
}

/// Ask for a partition netmask until a valid one, or nothing, is entered.
///
/// Returns `None` on an empty line or end of input.
pub fn prompt_prefix<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<PrefixLength>> {
    loop {
        write!(output, "Enter a Netmask to subnet (optional): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match parser::parse_prefix_token(line) {
            Ok(prefix) => return Ok(Some(prefix)),
            Err(e) => {
                log::warn!("Rejected netmask input: {e}");
                writeln!(output, "{}", INVALID_NETMASK_MSG.red())?;
            }
        }
    }
}

/// Address from `-i`, or prompted for when allowed.
pub fn resolve_network<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<Network, Box<dyn Error>> {
    match &config.ip {
        Some(ip) => parser::parse(ip, config.default_prefix).map_err(|e| -> Box<dyn Error> {
            log::error!("{e}");
            INVALID_IP_MSG.into()
        }),
        None if config.interactive => Ok(prompt_network(input, output, config.default_prefix)?),
        None => Err("No IP address given, pass one with -i".into()),
    }
}

/// Partition target from `-s`, or prompted for when allowed.
pub fn resolve_prefix<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<Option<PrefixLength>, Box<dyn Error>> {
    match &config.subnet {
        Some(token) => parser::parse_prefix_token(token).map(Some).map_err(|e| -> Box<dyn Error> {
            log::error!("{e}");
            INVALID_NETMASK_MSG.into()
        }),
        None if config.interactive => Ok(prompt_prefix(input, output)?),
        None => Ok(None),
    }
}

/// Resolve inputs, compute and print, reading prompts from `input`.
///
/// Input that cannot be resolved is reported on `output` before the error is
/// returned.
pub fn run_with<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<(), Box<dyn Error>> {
    log::info!("#Start run() format={:?}", config.format);

    if config.format == OutputFormat::Table && (config.ip.is_none() || config.subnet.is_none()) {
        output::write_banner(output)?;
    }
    let resolved = resolve_network(config, input, output)
        .and_then(|network| Ok((network, resolve_prefix(config, input, output)?)));
    let (network, target) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            writeln!(output, "{}", e.to_string().red())?;
            return Err(e);
        }
    };

    let report = compute_report(network, network.addr);
    let partition = target
        .map(|prefix| partition(network, prefix.bits()))
        .transpose()?;
    let calculation = Calculation { report, partition };

    match config.format {
        OutputFormat::Table => {
            writeln!(output)?;
            output::write_calculation(output, &calculation, config.max_rows)?;
        }
        OutputFormat::Json => output::write_json(output, &calculation, config.max_rows)?,
    }

    log::info!("#End run() {network}");
    Ok(())
}

/// Run against the process stdin and stdout.
pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    if !config.color {
        colored::control::set_override(false);
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, &mut stdin.lock(), &mut stdout.lock())
}
