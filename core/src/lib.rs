//! # portr core
//!
//! A bounded-concurrency TCP connect scanner.
//!
//! * [`validator`]: rejects malformed hosts, port ranges, and timeouts up front.
//! * [`network::tcp`]: one bounded-time connection attempt per port.
//! * [`network::resolver`]: turns a host name into the address a scan targets.
//! * [`scanner`]: fans probes out under a concurrency limit and aggregates the results.
//!
//! The functions at the crate root are the simplest way in.

use std::time::Duration;

use portr_common::config::Config;
use portr_common::error::ScanError;
use portr_common::scan::ScanResult;
use tokio_util::sync::CancellationToken;

pub mod network;
pub mod scanner;
pub mod validator;

pub use scanner::Scanner;

/// Scans `start_port..=end_port` on `host` and returns the open ports, ascending.
pub async fn scan(
    host: &str,
    start_port: u32,
    end_port: u32,
    timeout: Duration,
    max_concurrency: usize,
) -> Result<Vec<u16>, ScanError> {
    let config = Config {
        timeout,
        max_concurrency,
        ..Config::default()
    };
    let result = scan_with(host, start_port, end_port, &config, &CancellationToken::new()).await?;
    Ok(result.into_open_ports())
}

/// Like [`scan`], with full configuration, external cancellation, and the
/// complete [`ScanResult`].
pub async fn scan_with(
    host: &str,
    start_port: u32,
    end_port: u32,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<ScanResult, ScanError> {
    let request = validator::validate(host, start_port, end_port, config.timeout)?;
    let scanner = Scanner::new(config.clone())?;
    scanner.scan(&request, cancel).await
}
