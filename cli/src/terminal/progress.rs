//! A single, process-wide progress bar that log output is routed through,
//! so log lines never tear the bar.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{spinner:.blue} {elapsed_precise} {bar:36.cyan/blue} {pos:>5}/{len:5} {msg}";

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

fn get_bar() -> &'static ProgressBar {
    PROGRESS.get_or_init(ProgressBar::hidden)
}

/// Shows the bar for a scan of `len` ports. Stays hidden in quiet mode.
pub fn start(len: u64, quiet: bool) {
    let bar = get_bar();
    bar.set_length(len);
    bar.set_position(0);

    if quiet {
        return;
    }

    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        bar.set_style(
            style
                .progress_chars("■■□")
                .tick_strings(&["▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"]),
        );
    }
    bar.set_message("probing");
    bar.set_draw_target(ProgressDrawTarget::stderr());
    bar.enable_steady_tick(Duration::from_millis(100));
}

pub fn set_position(done: usize) {
    get_bar().set_position(done as u64);
}

pub fn finish() {
    let bar = get_bar();
    bar.disable_steady_tick();
    bar.finish_and_clear();
}

/// Writes whole lines to stdout with the bar suspended.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        get_bar().suspend(|| io::stdout().lock().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
