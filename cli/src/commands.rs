pub mod probe;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use portr_common::config::{Config, DEFAULT_MAX_CONCURRENCY, DEFAULT_RESOLVE_TIMEOUT};
use portr_common::network::range::PortRange;

#[derive(Parser)]
#[command(name = "portr", version)]
#[command(about = "A bounded-concurrency TCP port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print only the results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a range of TCP ports on one host
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Probe a single TCP port and report why it is closed
    #[command(alias = "p")]
    Probe {
        /// IPv4/IPv6 address or domain name
        host: String,
        port: u16,
        /// Connection timeout in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        timeout: u64,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// IPv4/IPv6 address or domain name
    pub host: String,

    /// Port or inclusive range, e.g. "22" or "1-1024"
    #[arg(short, long, default_value = "1-1024")]
    pub ports: PortRange,

    /// Per-port connection timeout in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    pub timeout: u64,

    /// Maximum number of simultaneous connection attempts
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Abort once more than this many unexpected I/O errors occurred
    #[arg(long)]
    pub max_io_errors: Option<usize>,

    /// Probe ports in random order
    #[arg(short, long)]
    pub randomize: bool,
}

impl ScanArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn to_config(&self) -> Config {
        Config {
            timeout: self.timeout(),
            max_concurrency: self.concurrency,
            max_io_errors: self.max_io_errors,
            randomize: self.randomize,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
