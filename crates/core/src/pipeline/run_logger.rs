use std::time::Instant;

/// Cross-cutting logger for batch orchestration events.
///
/// Decouples the use case from specific output mechanisms (stderr meter,
/// log crate, server log) so each caller can observe a run without changing
/// the orchestration code.
pub trait RunLogger: Send {
    /// Report per-file progress (`current` is 1-based).
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long one file took, end to end.
    fn file_timing(&mut self, file: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used in tests and by callers
/// with their own progress reporting.
pub struct NullRunLogger;

impl RunLogger for NullRunLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn file_timing(&mut self, _file: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` crate, with a per-file timing summary at the
/// end of the run.
pub struct StdoutRunLogger {
    timings: Vec<(String, f64)>,
    start_time: Instant,
    total_files: usize,
}

impl StdoutRunLogger {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
            start_time: Instant::now(),
            total_files: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing ran.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = Vec::new();
        lines.push(format!(
            "Run summary ({} file(s), {elapsed:.1}s total):",
            self.timings.len()
        ));
        for (file, ms) in &self.timings {
            lines.push(format!("  {file}: {:.1}s", ms / 1000.0));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutRunLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLogger for StdoutRunLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_files = total;
        log::info!("Transcribing file {current}/{total}");
    }

    fn file_timing(&mut self, file: &str, duration_ms: f64) {
        self.timings.push((file.to_string(), duration_ms));
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
