//! # Scan Target Model
//!
//! Defines the host a scan is pointed at.
//!
//! A target is accepted in one of these forms:
//! * An IPv4 address (e.g., `192.168.1.5`).
//! * An IPv6 address, bare or bracketed (e.g., `::1`, `[fe80::1]`).
//! * A domain name (e.g., `scanme.example.org`), which is resolved later, at scan time.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ScanError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A syntactically valid scan target. Parsing never touches the network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Host {
    /// An address literal, no resolution needed.
    Ip(IpAddr),
    /// A domain name, stored without a trailing root dot.
    Domain(String),
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ip(ip) => write!(f, "{ip}"),
            Host::Domain(name) => f.write_str(name),
        }
    }
}

impl FromStr for Host {
    type Err = ScanError;

    /// Parses a string into a `Host`.
    ///
    /// IP literals take precedence, so `127.0.0.1` is never treated as a domain.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(target) = parse_ip(s) {
            return Ok(target);
        }

        if let Some(target) = parse_domain(s) {
            return Ok(target);
        }

        Err(ScanError::InvalidHost { host: s.to_string() })
    }
}

/// Parses a bare or bracketed IP literal.
fn parse_ip(s: &str) -> Option<Host> {
    let unbracketed = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'));

    match unbracketed {
        Some(inner) => inner.parse::<std::net::Ipv6Addr>().ok().map(|ip| Host::Ip(IpAddr::V6(ip))),
        None => s.parse::<IpAddr>().ok().map(Host::Ip),
    }
}

/// Parses a domain name following the LDH label rules.
fn parse_domain(s: &str) -> Option<Host> {
    let name = s.strip_suffix('.').unwrap_or(s);

    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return None;
    }

    if !name.split('.').all(is_valid_label) {
        return None;
    }

    Some(Host::Domain(name.to_ascii_lowercase()))
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
