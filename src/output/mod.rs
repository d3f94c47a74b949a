//! Output formatting for calculation results.
//!
//! This module handles writing a [`crate::Calculation`]:
//! - [`terminal`] - aligned text tables
//! - [`json`] - machine readable JSON

mod json;
mod terminal;

pub use json::{write_json, JsonOutput, JsonPartition, SubnetRows};
pub use terminal::{
    format_thousands, write_banner, write_calculation, write_report, write_subnets,
    write_supernet,
};
