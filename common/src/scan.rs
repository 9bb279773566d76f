//! # Scan Data Model
//!
//! * [`ScanRequest`]: what to scan. Only exists in a valid state.
//! * [`ProbeOutcome`]: what one connection attempt observed.
//! * [`ScanResult`]: the aggregated, ordered answer to a request.

use std::time::Duration;

use crate::error::{ProbeErrorKind, ScanError};
use crate::network::range::PortRange;
use crate::network::target::Host;

/// A validated scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    host: Host,
    ports: PortRange,
    timeout: Duration,
}

impl ScanRequest {
    /// Host and ports are valid by construction, so only the timeout is left to check.
    pub fn new(host: Host, ports: PortRange, timeout: Duration) -> Result<Self, ScanError> {
        if timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        Ok(Self { host, ports, timeout })
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn ports(&self) -> PortRange {
        self.ports
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// The result of one probe against one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub port: u16,
    pub open: bool,
    pub error: Option<ProbeErrorKind>,
}

impl ProbeOutcome {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            open: true,
            error: None,
        }
    }

    pub fn closed(port: u16, error: ProbeErrorKind) -> Self {
        Self {
            port,
            open: false,
            error: Some(error),
        }
    }
}

/// Per-scan counters, grouped by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub probed: usize,
    pub open: usize,
    pub timeouts: usize,
    pub refused: usize,
    pub unreachable: usize,
    pub io_errors: usize,
}

impl ScanSummary {
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.probed += 1;
        match outcome.error {
            None => self.open += 1,
            Some(ProbeErrorKind::Timeout) => self.timeouts += 1,
            Some(ProbeErrorKind::Refused) => self.refused += 1,
            Some(ProbeErrorKind::Unreachable) => self.unreachable += 1,
            Some(ProbeErrorKind::ResolutionFailed) | Some(ProbeErrorKind::Io) => {
                self.io_errors += 1
            }
        }
    }

    pub fn closed(&self) -> usize {
        self.probed - self.open
    }
}

/// The aggregated outcome of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    open_ports: Vec<u16>,
    summary: ScanSummary,
    cancelled: bool,
}

impl ScanResult {
    /// Sorts and deduplicates `open_ports`, whatever order the probes finished in.
    pub fn new(mut open_ports: Vec<u16>, summary: ScanSummary, cancelled: bool) -> Self {
        open_ports.sort_unstable();
        open_ports.dedup();
        Self {
            open_ports,
            summary,
            cancelled,
        }
    }

    /// Open ports, strictly ascending.
    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }

    pub fn into_open_ports(self) -> Vec<u16> {
        self.open_ports
    }

    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// True when the scan was stopped before every port was dispatched.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn localhost() -> Host {
        Host::Ip(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    #[test]
    fn request_rejects_zero_timeout() {
        let ports = PortRange::new(1, 10).unwrap();
        assert_eq!(
            ScanRequest::new(localhost(), ports, Duration::ZERO),
            Err(ScanError::InvalidTimeout)
        );

        let req = ScanRequest::new(localhost(), ports, Duration::from_millis(1)).unwrap();
        assert_eq!(req.ports(), ports);
        assert_eq!(req.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn result_is_sorted_and_deduplicated() {
        let result = ScanResult::new(vec![443, 22, 8080, 22, 80], ScanSummary::default(), false);
        assert_eq!(result.open_ports(), &[22, 80, 443, 8080]);
        assert!(!result.is_cancelled());
    }

    #[test]
    fn summary_counts_each_outcome_class() {
        let mut summary = ScanSummary::default();
        summary.record(&ProbeOutcome::open(22));
        summary.record(&ProbeOutcome::closed(23, ProbeErrorKind::Refused));
        summary.record(&ProbeOutcome::closed(24, ProbeErrorKind::Refused));
        summary.record(&ProbeOutcome::closed(25, ProbeErrorKind::Timeout));
        summary.record(&ProbeOutcome::closed(26, ProbeErrorKind::Unreachable));
        summary.record(&ProbeOutcome::closed(27, ProbeErrorKind::Io));

        assert_eq!(
            summary,
            ScanSummary {
                probed: 6,
                open: 1,
                timeouts: 1,
                refused: 2,
                unreachable: 1,
                io_errors: 1,
            }
        );
        assert_eq!(summary.closed(), 5);
    }
}
