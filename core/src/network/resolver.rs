use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use portr_common::config::DEFAULT_RESOLVE_TIMEOUT;
use portr_common::error::ScanError;
use portr_common::network::target::Host;
use tokio::net::lookup_host;
use tokio::time::timeout;
use tracing::debug;

/// Turns a [`Host`] into the single address a scan will target.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, host: &Host) -> Result<IpAddr, ScanError>;
}

/// Resolves through the operating system's resolver.
///
/// When a name maps to several addresses, the first one returned by the system wins.
#[derive(Debug, Clone, Copy)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVE_TIMEOUT)
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &Host) -> Result<IpAddr, ScanError> {
        let name: &str = match host {
            Host::Ip(ip) => return Ok(*ip),
            Host::Domain(name) => name,
        };
        let failed = || ScanError::ResolutionFailed { host: name.to_string() };

        match timeout(self.timeout, lookup_host((name, 0))).await {
            Ok(Ok(mut addrs)) => {
                let addr = addrs.next().map(|sock| sock.ip()).ok_or_else(failed)?;
                debug!("Resolved {name} to {addr}");
                Ok(addr)
            }
            Ok(Err(e)) => {
                debug!("Lookup of {name} failed: {e}");
                Err(failed())
            }
            Err(_elapsed) => {
                debug!("Lookup of {name} timed out after {:?}", self.timeout);
                Err(failed())
            }
        }
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
