//! Work handed to every worker.

use crate::matcher::{SuffixSet, TargetError};

/// Default number of iterations between throughput samples.
pub const DEFAULT_REPORT_INTERVAL: u64 = 100;

/// Raw work assignment as dispatched by the coordinator.
///
/// Every worker receives the same assignment; suffixes are not partitioned.
/// Workers validate it themselves and treat a bad one as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkAssignment {
    /// Suffixes to search for
    pub suffixes: Vec<String>,
    /// Candidate length in bytes
    pub candidate_bytes: usize,
    /// Iterations between throughput samples
    pub report_interval: u64,
}

/// Reasons a worker refuses an assignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("invalid search terms: {0}")]
    Targets(#[from] TargetError),

    #[error("candidate length must be at least one byte")]
    ZeroCandidateBytes,

    #[error("report interval must be at least one iteration")]
    ZeroReportInterval,
}

/// An assignment that passed validation.
#[derive(Debug, Clone)]
pub struct Work {
    pub targets: SuffixSet,
    pub candidate_bytes: usize,
    pub report_interval: u64,
}

impl WorkAssignment {
    /// Validates the assignment.
    pub fn validate(&self) -> Result<Work, AssignmentError> {
        let targets = SuffixSet::new(self.suffixes.iter().cloned())?;

        if self.candidate_bytes == 0 {
            return Err(AssignmentError::ZeroCandidateBytes);
        }
        if self.report_interval == 0 {
            return Err(AssignmentError::ZeroReportInterval);
        }

        Ok(Work {
            targets,
            candidate_bytes: self.candidate_bytes,
            report_interval: self.report_interval,
        })
    }
}
