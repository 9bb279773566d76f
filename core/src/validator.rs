//! Input validation, run before any network activity.
//!
//! Checks are applied in a fixed order (host, then port range, then timeout) and
//! the first failure is returned. Domain names are checked for syntax only;
//! whether they resolve is decided at scan time.

use std::time::Duration;

use portr_common::error::ScanError;
use portr_common::network::range::PortRange;
use portr_common::network::target::Host;
use portr_common::scan::ScanRequest;

pub fn validate(
    host: &str,
    start_port: u32,
    end_port: u32,
    timeout: Duration,
) -> Result<ScanRequest, ScanError> {
    let host: Host = host.parse()?;
    let ports: PortRange = PortRange::new(start_port, end_port)?;
    ScanRequest::new(host, ports, timeout)
}

/// Same as [`validate`], for callers holding a signed millisecond count.
pub fn validate_millis(
    host: &str,
    start_port: u32,
    end_port: u32,
    timeout_ms: i64,
) -> Result<ScanRequest, ScanError> {
    let host: Host = host.parse()?;
    let ports: PortRange = PortRange::new(start_port, end_port)?;
    let timeout_ms = u64::try_from(timeout_ms).map_err(|_| ScanError::InvalidTimeout)?;
    ScanRequest::new(host, ports, Duration::from_millis(timeout_ms))
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
    use portr_common::error::ScanErrorKind;

    const ONE_SEC: Duration = Duration::from_secs(1);

    fn kind_of(result: Result<ScanRequest, ScanError>) -> Option<ScanErrorKind> {
        result.err().map(|e| e.kind())
    }

    #[test]
    fn accepts_well_formed_input() {
        let req = validate("127.0.0.1", 1, 65535, ONE_SEC).unwrap();
        assert_eq!(req.ports().len(), 65535);

        let req = validate("example.com", 80, 80, ONE_SEC).unwrap();
        assert_eq!(req.host(), &Host::Domain("example.com".into()));
    }

    #[test]
    fn rejects_invalid_hosts() {
        for host in ["", "not a host!!", "under_score.com", "-x.com"] {
            assert_eq!(
                kind_of(validate(host, 1, 10, ONE_SEC)),
                Some(ScanErrorKind::InvalidHost),
                "host '{host}'"
            );
        }
    }

    #[test]
    fn rejects_invalid_port_ranges() {
        for (start, end) in [(0, 10), (1, 65536), (200, 100), (0, 0), (70000, 70001)] {
            assert_eq!(
                kind_of(validate("127.0.0.1", start, end, ONE_SEC)),
                Some(ScanErrorKind::InvalidPortRange),
                "range {start}-{end}"
            );
        }
    }

    #[test]
    fn rejects_non_positive_timeouts() {
        assert_eq!(
            kind_of(validate("127.0.0.1", 1, 10, Duration::ZERO)),
            Some(ScanErrorKind::InvalidTimeout)
        );
        assert_eq!(
            kind_of(validate_millis("127.0.0.1", 1, 10, 0)),
            Some(ScanErrorKind::InvalidTimeout)
        );
        assert_eq!(
            kind_of(validate_millis("127.0.0.1", 1, 10, -250)),
            Some(ScanErrorKind::InvalidTimeout)
        );
        assert!(validate_millis("127.0.0.1", 1, 10, 250).is_ok());
    }

    #[test]
    fn host_is_checked_before_ports_and_timeout() {
        assert_eq!(
            kind_of(validate("bad host", 0, 0, Duration::ZERO)),
            Some(ScanErrorKind::InvalidHost)
        );
        assert_eq!(
            kind_of(validate("localhost", 0, 0, Duration::ZERO)),
            Some(ScanErrorKind::InvalidPortRange)
        );
    }
}
