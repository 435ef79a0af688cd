//! Reporting of search progress.
//!
//! The coordinator surfaces everything through [`Reporter`]; what happens
//! to it (console, test recorder) is up to the implementation.

use log::{error, info};

use crate::coordinator::ThroughputReport;
use crate::worker::Match;

/// Consumer of coordinator output.
pub trait Reporter {
    /// Informational text from a worker, or from the coordinator when
    /// `worker_id` is `None`.
    fn message(&mut self, worker_id: Option<usize>, text: &str);

    /// A solution; `running` counts matches so far, including this one.
    fn matched(&mut self, found: &Match, running: usize, target: usize);

    /// An aggregated throughput estimate.
    fn throughput(&mut self, report: &ThroughputReport);

    /// An unrecoverable error. The search shuts down right after.
    fn fatal(&mut self, worker_id: Option<usize>, text: &str);
}

/// Prints matches to stdout and everything else through `log`.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn message(&mut self, worker_id: Option<usize>, text: &str) {
        info!("[{}] {}", source(worker_id), text);
    }

    fn matched(&mut self, found: &Match, running: usize, target: usize) {
        println!("=== Match {}/{} ===", running, target);
        println!("Address:  {}", found.address);
        println!("Password: {}", found.candidate);
        println!("Worker:   {}", found.worker_id);
        println!();
    }

    fn throughput(&mut self, report: &ThroughputReport) {
        info!(
            "Speed: approximately {} checks per second.",
            format_rate(report.checks_per_second)
        );
    }

    fn fatal(&mut self, worker_id: Option<usize>, text: &str) {
        error!("[{}] {}", source(worker_id), text);
    }
}

fn source(worker_id: Option<usize>) -> String {
    match worker_id {
        Some(id) => format!("worker {}", id),
        None => "main".to_string(),
    }
}

/// Formats a rate with a K/M/B suffix.
pub fn format_rate(n: f64) -> String {
    if n >= 1_000_000_000.0 {
        format!("{:.2}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.2}K", n / 1_000.0)
    } else {
        format!("{:.2}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(12.345), "12.35");
        assert_eq!(format_rate(45_600.0), "45.60K");
        assert_eq!(format_rate(3_200_000.0), "3.20M");
        assert_eq!(format_rate(7_000_000_000.0), "7.00B");
    }

    #[test]
    fn test_source() {
        assert_eq!(source(Some(3)), "worker 3");
        assert_eq!(source(None), "main");
    }
}
