//! A progress bar for reading the input files of `huff`.
//!
//! Built on `indicatif`, see <https://docs.rs/indicatif>

use std::io::Read;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// Wraps a reader and advances a progress bar by every byte read from it.
///
/// Once `total` bytes went through, the bar is cleared and a throughput
/// summary is logged instead.
pub struct ProgressMonitor<R: Read> {
    /// Shown in the summary, usually the file name
    label: String,
    /// Size of the input in bytes
    pub total: u64,
    pub read: u64,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    pub fn new(reader: R, total: u64, label: impl Into<String>) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template("{wide_bar} {binary_bytes}/{binary_total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::new(total).with_style(style);
        // redrawing at the default 20hz is wasted on inputs this small
        progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        Self {
            label: label.into(),
            total,
            read: 0,
            reader,
            progress_bar,
        }
    }

    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            info!(
                "read {} from {} in {} ({}/s)",
                fmt_size(self.total),
                self.label,
                fmt_duration(elapsed),
                fmt_size((self.total as f64 / elapsed.as_secs_f64().max(1e-6)) as u64)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.read += n as u64;
        self.update(n as u64);
        Ok(n)
    }
}

/// A byte count in binary units: `"512B"`, `"1.50KiB"`, `"3.00MiB"`
pub fn fmt_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}{}", bytes, UNITS[0])
    } else {
        format!("{:.2}{}", value, UNITS[unit])
    }
}

/// A duration with a precision that fits its magnitude: `"7.00ms"`, `"1.5s"`, `"2m 5s"`
pub fn fmt_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = duration.as_secs();
        let (hours, minutes, seconds) = (whole / 3600, whole / 60 % 60, whole % 60);
        let mut parts = Vec::with_capacity(3);
        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        parts.join(" ")
    }
}
