use std::time::Duration;

use colored::*;
use portr_common::error::ScanError;
use portr_common::network::target::Host;
use portr_core::network::tcp;

use crate::mprint;
use crate::terminal::print;

pub async fn probe(host: &str, port: u16, timeout_ms: u64, quiet: bool) -> anyhow::Result<()> {
    let host: Host = host.parse()?;
    if timeout_ms == 0 {
        return Err(ScanError::InvalidTimeout.into());
    }
    let outcome = tcp::probe(&host, port, Duration::from_millis(timeout_ms)).await;

    let state: ColoredString = match outcome.error {
        None => "open".green().bold(),
        Some(reason) => format!("closed ({reason})").red(),
    };

    if quiet {
        mprint!(&state.to_string());
    } else {
        print::header(&format!("probing {host}"));
        print::aligned_line(&format!("{port}/tcp"), state);
        print::end_of_program();
    }
    Ok(())
}
