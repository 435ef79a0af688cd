//! Rolling throughput aggregation.

use std::time::{Duration, Instant};

/// Minimum time between two aggregated reports.
pub const THROUGHPUT_WINDOW: Duration = Duration::from_secs(1);

/// An aggregated throughput estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputReport {
    /// Samples folded into this report
    pub samples: usize,
    /// Mean of the reported per-candidate times, in microseconds
    pub mean_micros_per_check: f64,
    /// Estimated checks per second across the whole pool
    pub checks_per_second: f64,
}

/// Collects worker samples and emits at most one report per window.
///
/// The pool-wide rate is the mean individual rate multiplied by the worker
/// count. It is an approximation: samples are cumulative per-worker averages
/// and a chatty worker weighs more than a quiet one.
#[derive(Debug)]
pub struct ThroughputWindow {
    window: Duration,
    workers: usize,
    last_report: Instant,
    samples: Vec<f64>,
}

impl ThroughputWindow {
    /// Creates a window whose first period starts at `start`.
    pub fn new(workers: usize, start: Instant) -> Self {
        Self::with_window(workers, start, THROUGHPUT_WINDOW)
    }

    /// Creates a window with a custom period.
    pub fn with_window(workers: usize, start: Instant, window: Duration) -> Self {
        Self {
            window,
            workers,
            last_report: start,
            samples: Vec::new(),
        }
    }

    /// Records a sample taken at `now`.
    ///
    /// Returns a report once strictly more than one window has passed since
    /// the previous report, then starts a new window.
    pub fn record(&mut self, micros_per_check: f64, now: Instant) -> Option<ThroughputReport> {
        self.samples.push(micros_per_check);

        if now.saturating_duration_since(self.last_report) <= self.window {
            return None;
        }

        let samples = self.samples.len();
        let mean = self.samples.iter().sum::<f64>() / samples as f64;
        let per_worker = if mean > 0.0 { 1e6 / mean } else { 0.0 };

        self.last_report = now;
        self.samples.clear();

        Some(ThroughputReport {
            samples,
            mean_micros_per_check: mean,
            checks_per_second: per_worker * self.workers as f64,
        })
    }

    /// Returns the number of samples waiting for the next report.
    pub fn pending(&self) -> usize {
        self.samples.len()
    }
}
