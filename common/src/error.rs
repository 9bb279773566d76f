//! # Error Taxonomy
//!
//! Two families of failure exist in a scan:
//!
//! * [`ScanError`]: fatal to the whole call. Raised for malformed input before any
//!   socket is opened, for a host that cannot be resolved, and when the coordinator
//!   gives up after too many unexpected I/O errors.
//! * [`ProbeErrorKind`]: the expected, per-port reasons a probe did not connect.
//!   These never escalate; they are recorded on the probe outcome and the scan moves on.

use std::fmt;

use thiserror::Error;

/// A scan-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The host is neither an IP literal nor a syntactically valid domain name.
    #[error("invalid host: '{host}'")]
    InvalidHost { host: String },

    /// The port range is empty, reversed, or outside `1..=65535`.
    #[error("invalid port range: {start}-{end}")]
    InvalidPortRange { start: u32, end: u32 },

    /// The per-probe timeout is not strictly positive.
    #[error("invalid timeout: must be greater than zero")]
    InvalidTimeout,

    /// The concurrency limit is zero.
    #[error("invalid concurrency limit: must be greater than zero")]
    InvalidConcurrency,

    /// The host parsed, but did not resolve to any address.
    #[error("could not resolve host '{host}'")]
    ResolutionFailed { host: String },

    /// More unexpected I/O errors than the configured threshold allows.
    #[error("scan aborted after {count} unexpected I/O errors")]
    TooManyErrors { count: usize },
}

/// Field-less discriminant of [`ScanError`], for matching on the failure class alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    InvalidHost,
    InvalidPortRange,
    InvalidTimeout,
    InvalidConcurrency,
    ResolutionFailed,
    TooManyErrors,
}

impl ScanError {
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            ScanError::InvalidHost { .. } => ScanErrorKind::InvalidHost,
            ScanError::InvalidPortRange { .. } => ScanErrorKind::InvalidPortRange,
            ScanError::InvalidTimeout => ScanErrorKind::InvalidTimeout,
            ScanError::InvalidConcurrency => ScanErrorKind::InvalidConcurrency,
            ScanError::ResolutionFailed { .. } => ScanErrorKind::ResolutionFailed,
            ScanError::TooManyErrors { .. } => ScanErrorKind::TooManyErrors,
        }
    }
}

/// Why a single probe did not report the port as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeErrorKind {
    /// No answer within the probe timeout.
    Timeout,
    /// The peer actively refused (RST).
    Refused,
    /// No route to the host or network.
    Unreachable,
    /// The host name could not be resolved.
    ResolutionFailed,
    /// Anything else the OS reported, e.g. descriptor exhaustion.
    Io,
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Refused => "refused",
            ProbeErrorKind::Unreachable => "unreachable",
            ProbeErrorKind::ResolutionFailed => "resolution failed",
            ProbeErrorKind::Io => "i/o error",
        };
        f.write_str(s)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
