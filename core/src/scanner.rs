//! The scan **coordinator**.
//!
//! Resolves the target once, then fans probes out over the port range with at most
//! `max_concurrency` in flight, and folds their outcomes into a [`ScanResult`].
//!
//! Probing and resolution sit behind the [`Prober`] and [`Resolver`] traits, so the
//! coordinator can be driven by instrumented implementations in tests.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use portr_common::config::Config;
use portr_common::error::{ProbeErrorKind, ScanError};
use portr_common::network::range::PortRange;
use portr_common::scan::{ProbeOutcome, ScanRequest, ScanResult, ScanSummary};
use rand::seq::SliceRandom;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::network::resolver::{Resolver, SystemResolver};
use crate::network::tcp::{Prober, TcpProber};
use crate::validator;

/// Invoked with the number of completed probes each time one finishes.
pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

pub struct Scanner<P = TcpProber, R = SystemResolver> {
    prober: Arc<P>,
    resolver: R,
    config: Config,
    on_progress: Option<ProgressCallback>,
}

struct Tally {
    range: PortRange,
    open_ports: Vec<u16>,
    summary: ScanSummary,
}

impl Tally {
    fn new(range: PortRange) -> Self {
        Self {
            range,
            open_ports: Vec::new(),
            summary: ScanSummary::default(),
        }
    }
}

impl Scanner<TcpProber, SystemResolver> {
    /// A scanner using real TCP connects and the system resolver.
    pub fn new(config: Config) -> Result<Self, ScanError> {
        let resolver = SystemResolver::new(config.resolve_timeout);
        Self::with_parts(config, TcpProber, resolver)
    }
}

impl<P, R> Scanner<P, R>
where
    P: Prober + 'static,
    R: Resolver,
{
    pub fn with_parts(config: Config, prober: P, resolver: R) -> Result<Self, ScanError> {
        if config.max_concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }

        Ok(Self {
            prober: Arc::new(prober),
            resolver,
            config,
            on_progress: None,
        })
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Validates raw input against this scanner's timeout, then scans.
    pub async fn scan_target(
        &self,
        host: &str,
        start_port: u32,
        end_port: u32,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let request = validator::validate(host, start_port, end_port, self.config.timeout)?;
        self.scan(&request, cancel).await
    }

    /// Runs a full scan.
    ///
    /// Fails only on resolution errors or when the I/O error threshold is exceeded.
    /// Cancelling `cancel` stops dispatch; probes already in flight finish within
    /// their own timeout and the partial result is returned with
    /// [`ScanResult::is_cancelled`] set.
    pub async fn scan(
        &self,
        request: &ScanRequest,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let started: Instant = Instant::now();
        let ip: IpAddr = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Scan of {} cancelled while resolving", request.host());
                return Ok(ScanResult::new(Vec::new(), ScanSummary::default(), true));
            }
            resolved = self.resolver.resolve(request.host()) => resolved?,
        };
        let ports: Vec<u16> = self.dispatch_order(request.ports());

        info!(
            "Scanning {} port(s) on {} ({ip}), up to {} in flight",
            ports.len(),
            request.host(),
            self.config.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut tasks: JoinSet<ProbeOutcome> = JoinSet::new();
        let mut in_flight: HashMap<task::Id, u16> = HashMap::new();
        let mut tally = Tally::new(request.ports());
        let mut cancelled = false;

        for port in ports {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                permit = Arc::clone(&semaphore).acquire_owned() => permit,
            };
            let Ok(permit) = permit else { break };

            while let Some(joined) = tasks.try_join_next_with_id() {
                self.reap(&mut tally, &mut in_flight, joined);
            }
            if self.exceeds_io_threshold(&tally) {
                break;
            }

            let addr = SocketAddr::new(ip, port);
            let probe_timeout = request.timeout();
            let prober = Arc::clone(&self.prober);

            trace!("Dispatching probe to {addr}");
            let handle = tasks.spawn(async move {
                // Bounded here as well, whatever the prober does.
                let outcome = timeout(probe_timeout, prober.probe(addr, probe_timeout))
                    .await
                    .unwrap_or_else(|_elapsed| {
                        ProbeOutcome::closed(addr.port(), ProbeErrorKind::Timeout)
                    });
                drop(permit);
                outcome
            });
            in_flight.insert(handle.id(), port);
        }

        if cancelled {
            warn!("Scan cancelled, waiting for {} in-flight probe(s)", tasks.len());
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            self.reap(&mut tally, &mut in_flight, joined);
        }

        if self.exceeds_io_threshold(&tally) {
            warn!(
                "Aborting scan of {}: {} unexpected I/O errors",
                request.host(),
                tally.summary.io_errors
            );
            return Err(ScanError::TooManyErrors {
                count: tally.summary.io_errors,
            });
        }

        let result = ScanResult::new(tally.open_ports, tally.summary, cancelled);
        info!(
            "Scan of {} finished: {} open of {} probed in {:.2}s",
            request.host(),
            result.open_ports().len(),
            result.summary().probed,
            started.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    fn dispatch_order(&self, range: PortRange) -> Vec<u16> {
        let mut ports: Vec<u16> = range.iter().collect();
        if self.config.randomize {
            ports.shuffle(&mut rand::rng());
        }
        ports
    }

    /// Folds a finished task into the tally. A panicked task counts as a closed port.
    fn reap(
        &self,
        tally: &mut Tally,
        in_flight: &mut HashMap<task::Id, u16>,
        joined: Result<(task::Id, ProbeOutcome), JoinError>,
    ) {
        let outcome: ProbeOutcome = match joined {
            Ok((id, outcome)) => {
                in_flight.remove(&id);
                outcome
            }
            Err(e) => {
                let Some(port) = in_flight.remove(&e.id()) else {
                    warn!("Probe task failed: {e}");
                    return;
                };
                warn!("Probe of port {port} failed: {e}");
                ProbeOutcome::closed(port, ProbeErrorKind::Io)
            }
        };
        self.collect(tally, outcome);
    }

    fn collect(&self, tally: &mut Tally, outcome: ProbeOutcome) {
        tally.summary.record(&outcome);
        if outcome.open && tally.range.contains(outcome.port) {
            debug!("Port {} is open", outcome.port);
            tally.open_ports.push(outcome.port);
        }
        if let Some(callback) = &self.on_progress {
            callback(tally.summary.probed);
        }
    }

    fn exceeds_io_threshold(&self, tally: &Tally) -> bool {
        self.config
            .max_io_errors
            .is_some_and(|max| tally.summary.io_errors > max)
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
