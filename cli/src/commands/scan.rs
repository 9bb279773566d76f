use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use portr_common::scan::{ScanRequest, ScanResult};
use portr_core::{Scanner, validator};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::commands::ScanArgs;
use crate::mprint;
use crate::terminal::{colors, print, progress};

pub async fn scan(args: ScanArgs, quiet: bool) -> anyhow::Result<()> {
    let request: ScanRequest = validator::validate(
        &args.host,
        args.ports.start().into(),
        args.ports.end().into(),
        args.timeout(),
    )?;

    let cancel: CancellationToken = cancel_on_ctrl_c();
    let scanner = Scanner::new(args.to_config())?.on_progress(progress::set_position);

    progress::start(request.ports().len() as u64, quiet);
    let start_time: Instant = Instant::now();
    let outcome = scanner.scan(&request, &cancel).await;
    progress::finish();

    let result: ScanResult = outcome.with_context(|| format!("scan of {} failed", request.host()))?;
    scan_ends(&request, &result, start_time.elapsed(), quiet);
    Ok(())
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, waiting for in-flight probes");
            trigger.cancel();
        }
    });
    cancel
}

fn scan_ends(request: &ScanRequest, result: &ScanResult, total_time: Duration, quiet: bool) {
    if quiet {
        for port in result.open_ports() {
            mprint!(&port.to_string());
        }
        return;
    }

    if result.open_ports().is_empty() {
        print::header("zero open ports");
        print::no_results();
    } else {
        print::header(&format!("open ports on {}", request.host()));
        print_ports(result.open_ports());
    }
    print_summary(request, result, total_time);
}

fn print_ports(ports: &[u16]) {
    for port in ports {
        print::aligned_line(&format!("{port}/tcp"), "open".green().bold());
    }
}

fn print_summary(request: &ScanRequest, result: &ScanResult, total_time: Duration) {
    let summary = result.summary();
    let open: ColoredString = format!("{} open", summary.open).bold().green();
    let probed: ColoredString = format!("{} of {} ports", summary.probed, request.ports().len()).bold();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let headline: String = format!("Scan Complete: {open} in {probed} probed in {total_time}");

    print::fat_separator();
    print::centerln(&headline.color(colors::TEXT_DEFAULT).to_string());

    print::as_tree_one_level(vec![
        ("Refused".to_string(), summary.refused.to_string().normal()),
        ("Timeout".to_string(), summary.timeouts.to_string().normal()),
        ("Unreach".to_string(), summary.unreachable.to_string().normal()),
        ("Errors".to_string(), colour_errors(summary.io_errors)),
    ]);

    if result.is_cancelled() {
        mprint!();
        print::print_status("Scan was cancelled before every port was probed".yellow().to_string());
    }
    print::end_of_program();
}

fn colour_errors(count: usize) -> ColoredString {
    match count {
        0 => count.to_string().normal(),
        _ => count.to_string().red().bold(),
    }
}
