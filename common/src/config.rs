use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_CONCURRENCY: usize = 256;
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a single connection attempt.
    pub timeout: Duration,

    /// Maximum number of probes in flight at once. Must be greater than zero.
    pub max_concurrency: usize,

    /// Abort the scan once more than this many unexpected I/O errors occurred.
    ///
    /// `None` never aborts; such errors only mark the port as closed.
    pub max_io_errors: Option<usize>,

    /// Dispatch ports in random order instead of ascending.
    ///
    /// Does not affect the order of the returned open ports.
    pub randomize: bool,

    /// Upper bound for resolving a domain name before the first probe.
    pub resolve_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_io_errors: None,
            randomize: false,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }
}
