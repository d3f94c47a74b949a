//! Runtime configuration and logging setup.
//!
//! [`Config`] gathers the command line flags and environment overrides into a
//! single value that is handed to [`crate::cli::run`].

use crate::cli::Args;
use crate::error::ParseError;
use crate::models::PrefixLength;
use crate::parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::env;
use std::error::Error;
use std::path::Path;

/// Environment variable overriding the prefix applied to bare addresses.
pub const DEFAULT_PREFIX_ENV: &str = "SUBNET_WIZARD_DEFAULT_PREFIX";
/// Environment variable pointing at an alternative log4rs file.
pub const LOG_CONFIG_ENV: &str = "SUBNET_WIZARD_LOG_CONFIG";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Subnet rows printed before the listing is cut short.
pub const DEFAULT_MAX_ROWS: usize = 1024;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address token from `-i`; prompted for when absent.
    pub ip: Option<String>,
    /// Netmask token from `-s`; prompted for when absent.
    pub subnet: Option<String>,
    /// Prefix used when the address carries no suffix.
    pub default_prefix: PrefixLength,
    /// Prompt for missing values instead of failing.
    pub interactive: bool,
    pub format: OutputFormat,
    /// Maximum subnet rows to print, 0 for no limit.
    pub max_rows: usize,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ip: None,
            subnet: None,
            default_prefix: PrefixLength::DEFAULT,
            interactive: true,
            format: OutputFormat::Table,
            max_rows: DEFAULT_MAX_ROWS,
            color: true,
        }
    }
}

impl Config {
    /// Build from parsed flags, reading [`DEFAULT_PREFIX_ENV`] from the environment.
    pub fn from_args(args: Args) -> Result<Config, ParseError> {
        let default_prefix = default_prefix_from(env::var(DEFAULT_PREFIX_ENV).ok().as_deref())?;
        Ok(Config {
            ip: args.ip,
            subnet: args.subnet,
            default_prefix,
            interactive: !args.non_interactive,
            format: args.format,
            max_rows: args.limit,
            color: !args.no_color,
        })
    }
}

/// Prefix to apply to bare addresses, from an optional override value.
pub fn default_prefix_from(value: Option<&str>) -> Result<PrefixLength, ParseError> {
    match value.map(str::trim) {
        None | Some("") => Ok(PrefixLength::DEFAULT),
        Some(value) => {
            let prefix = parser::parse_prefix(value.trim_matches('/'))?;
            log::debug!("default prefix overridden to /{prefix}");
            Ok(prefix)
        }
    }
}

/// Initialise log4rs from [`LOG_CONFIG_ENV`] or `log4rs.yml`.
///
/// Without a config file warnings and errors go to stderr.
pub fn init_logging() -> Result<(), Box<dyn Error>> {
    let path = env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string());
    if Path::new(&path).exists() {
        log4rs::init_file(&path, Default::default())?;
        log::debug!("Logging configured from {path}");
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}
