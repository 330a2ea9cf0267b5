//! Terminal progress for one compress or decompress run.
//!
//! A byte bar is shown while the input is read, after that a spinner names
//! the codec stage that is running. See <https://docs.rs/indicatif>

use std::fmt;
use std::io::{self, Read};
use std::time::{Duration, Instant};

use huffpack::io::FileReport;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// The steps a run goes through after the input has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Counting,
    Packing { bits: u64 },
    Parsing,
    Decoding { symbols: u64 },
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Counting => f.write_str("counting symbols"),
            Stage::Packing { bits } => write!(f, "packing {} code bits", bits),
            Stage::Parsing => f.write_str("parsing header"),
            Stage::Decoding { symbols } => write!(f, "decoding {} symbols", symbols),
            Stage::Writing => f.write_str("writing output"),
        }
    }
}

pub struct Progress {
    bar: ProgressBar,
    started: Instant,
}

impl Progress {
    /// Start a byte bar for an input of `input_len` bytes
    pub fn new(input_len: u64) -> Self {
        // default is 20hz
        let bar =
            ProgressBar::with_draw_target(Some(input_len), ProgressDrawTarget::stderr_with_hz(8));
        if let Ok(style) =
            ProgressStyle::with_template("reading {wide_bar} {binary_bytes}/{binary_total_bytes}")
        {
            bar.set_style(style);
        }
        Progress {
            bar,
            started: Instant::now(),
        }
    }

    /// Read all of `reader`, advancing the bar
    pub fn read_all<R: Read>(&self, reader: R) -> io::Result<Vec<u8>> {
        let capacity = self.bar.length().unwrap_or(0) as usize;
        let mut bytes = Vec::with_capacity(capacity);
        self.bar.wrap_read(reader).read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Switch the bar to a spinner showing `stage`
    pub fn stage(&self, stage: Stage) {
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
            self.bar.set_style(style);
        }
        self.bar.set_message(stage.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(120));
        debug!(
            stage = %stage,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "entering stage"
        );
    }

    /// Clear the bar and return how long the run took
    pub fn finish(self) -> Duration {
        self.bar.finish_and_clear();
        self.started.elapsed()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        // runs that bail out early still clear the terminal line
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Binary units with one decimal, whole bytes below 1 KiB
pub fn fmt_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// `12.0 KiB -> 6.3 KiB (52.1%)`
pub fn describe(report: &FileReport) -> String {
    format!(
        "{} -> {} ({:.1}%)",
        fmt_size(report.input_bytes),
        fmt_size(report.output_bytes),
        report.ratio() * 100.0
    )
}
