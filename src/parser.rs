//! Address and netmask parsing.
//!
//! Turns user text such as `192.168.1.10/24`, `10.0.0.1/255.255.255.0` or a
//! bare `26` into validated [`Network`] and [`PrefixLength`] values.

use crate::error::ParseError;
use crate::models::{Network, PrefixLength};
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Regex for a dotted quad, four groups of one to three ASCII digits.
static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

/// Parse an address with an optional `/N` or `/M.M.M.M` suffix.
///
/// Without a suffix `default_prefix` applies. Host bits in the address are
/// kept; they are cleared when the report is computed.
///
/// # Examples
/// ```
/// use subnet_wizard::models::PrefixLength;
/// use subnet_wizard::parser::parse;
/// let net = parse("10.0.0.1/255.255.0.0", PrefixLength::DEFAULT).unwrap();
/// assert_eq!(net.to_string(), "10.0.0.1/16");
/// ```
pub fn parse(input: &str, default_prefix: PrefixLength) -> Result<Network, ParseError> {
    let input = input.trim();
    log::trace!("parse({input:?}, default /{default_prefix})");

    let (addr_part, suffix) = match input.split_once('/') {
        Some((addr, suffix)) => (addr, Some(suffix)),
        None => (input, None),
    };

    let addr = parse_address(addr_part)?;
    let prefix = match suffix {
        Some(suffix) => parse_prefix(suffix)?,
        None => default_prefix,
    };

    Ok(Network::new(addr, prefix))
}

/// Parse a standalone netmask token, a bare `0..=32` or a dotted mask.
///
/// Used for the partition target, so the literal `0` is refused. Slashes around
/// the token are stripped after that check, so `/26` works like `26` and `/0`
/// selects the whole address space.
pub fn parse_prefix_token(token: &str) -> Result<PrefixLength, ParseError> {
    let token = token.trim();
    if token == "0" {
        return Err(ParseError::ZeroPrefixDisallowed);
    }
    parse_prefix(token.trim_matches('/'))
}

/// Parse a dotted-decimal netmask such as `255.255.254.0` into its prefix.
///
/// The mask must be contiguous: leading ones followed only by zeros.
pub fn parse_dotted_mask(mask: &str) -> Result<PrefixLength, ParseError> {
    let octets =
        parse_octets(mask.trim()).ok_or_else(|| ParseError::InvalidPrefix(mask.to_string()))?;
    let bits = u32::from(Ipv4Addr::from(octets));

    if bits.leading_ones() + bits.trailing_zeros() != u32::BITS {
        log::debug!("non-contiguous netmask {mask} = {bits:#034b}");
        return Err(ParseError::InvalidPrefix(mask.to_string()));
    }

    PrefixLength::try_from(bits.leading_ones() as u8)
        .map_err(|_| ParseError::InvalidPrefix(mask.to_string()))
}

/// Parse a dotted-decimal IPv4 address.
pub fn parse_address(addr: &str) -> Result<Ipv4Addr, ParseError> {
    parse_octets(addr.trim())
        .map(Ipv4Addr::from)
        .ok_or_else(|| ParseError::InvalidAddress(addr.to_string()))
}

/// Parse a prefix written as `0..=32` or as a dotted mask. Unlike
/// [`parse_prefix_token`] a zero prefix is accepted.
pub fn parse_prefix(suffix: &str) -> Result<PrefixLength, ParseError> {
    if suffix.contains('.') {
        return parse_dotted_mask(suffix);
    }
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPrefix(suffix.to_string()));
    }
    suffix
        .parse::<u8>()
        .ok()
        .and_then(|bits| PrefixLength::try_from(bits).ok())
        .ok_or_else(|| ParseError::InvalidPrefix(suffix.to_string()))
}

/// Split a dotted quad into octets. Values above 255 and multi-digit octets
/// with a leading zero are rejected.
fn parse_octets(s: &str) -> Option<[u8; 4]> {
    let caps = get_dotted_quad_regex().captures(s)?;
    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let digits = caps.get(i + 1)?.as_str();
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        *octet = digits.parse::<u8>().ok()?;
    }
    Some(octets)
}
