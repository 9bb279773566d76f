//! TCP connect probing.
//!
//! A probe is one `connect()` bounded by a timeout. The outcome is classified and
//! returned as a value; a probe never fails and never retries.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use portr_common::error::ProbeErrorKind;
use portr_common::network::target::Host;
use portr_common::scan::ProbeOutcome;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

use super::resolver::{Resolver, SystemResolver};

/// Attempts a single bounded-time connection and reports what happened.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: SocketAddr, timeout: Duration) -> ProbeOutcome;
}

/// Full three-way handshake through the OS socket API. Needs no privileges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, addr: SocketAddr, probe_timeout: Duration) -> ProbeOutcome {
        let port: u16 = addr.port();

        match timeout(probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                trace!("{addr} accepted");
                ProbeOutcome::open(port)
            }
            Ok(Err(e)) => {
                let kind: ProbeErrorKind = classify(&e);
                match kind {
                    ProbeErrorKind::Io => debug!("Unexpected error probing {addr}: {e}"),
                    _ => trace!("{addr} {kind}: {e}"),
                }
                ProbeOutcome::closed(port, kind)
            }
            Err(_elapsed) => {
                trace!("{addr} timed out after {probe_timeout:?}");
                ProbeOutcome::closed(port, ProbeErrorKind::Timeout)
            }
        }
    }
}

/// Probes one port of `host`, resolving it first.
///
/// Resolution and connection are each bounded by `probe_timeout`. Scans should go
/// through the scanner instead, which resolves once for the whole range.
pub async fn probe(host: &Host, port: u16, probe_timeout: Duration) -> ProbeOutcome {
    let resolver = SystemResolver::new(probe_timeout);
    match resolver.resolve(host).await {
        Ok(ip) => TcpProber.probe(SocketAddr::new(ip, port), probe_timeout).await,
        Err(e) => {
            debug!("{e}");
            ProbeOutcome::closed(port, ProbeErrorKind::ResolutionFailed)
        }
    }
}

/// Maps an OS connect error onto the probe taxonomy.
pub fn classify(err: &io::Error) -> ProbeErrorKind {
    match err.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            ProbeErrorKind::Refused
        }
        io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::NetworkDown => ProbeErrorKind::Unreachable,
        io::ErrorKind::TimedOut => ProbeErrorKind::Timeout,
        _ => ProbeErrorKind::Io,
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
