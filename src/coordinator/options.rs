//! Search parameters.

use crate::crypto::DEFAULT_CANDIDATE_BYTES;
use crate::worker::{WorkAssignment, DEFAULT_REPORT_INTERVAL};

/// Everything the coordinator needs to run a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Suffixes to search for, OR'd together
    pub suffixes: Vec<String>,
    /// Matches to find before stopping
    pub target: usize,
    /// Number of worker threads
    pub workers: usize,
    /// Iterations between worker throughput samples
    pub report_interval: u64,
    /// Candidate length in bytes
    pub candidate_bytes: usize,
}

impl SearchOptions {
    /// Creates options with defaults: one match, one worker per CPU, a
    /// sample every 100 iterations, 32-byte candidates.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            target: 1,
            workers: num_cpus::get(),
            report_interval: DEFAULT_REPORT_INTERVAL,
            candidate_bytes: DEFAULT_CANDIDATE_BYTES,
        }
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_report_interval(mut self, report_interval: u64) -> Self {
        self.report_interval = report_interval;
        self
    }

    pub fn with_candidate_bytes(mut self, candidate_bytes: usize) -> Self {
        self.candidate_bytes = candidate_bytes;
        self
    }

    /// Builds the assignment sent to every worker.
    pub fn assignment(&self) -> WorkAssignment {
        WorkAssignment {
            suffixes: self.suffixes.clone(),
            candidate_bytes: self.candidate_bytes,
            report_interval: self.report_interval,
        }
    }
}
