//! Events flowing from workers to the coordinator.

use crate::crypto::Address;

/// A candidate whose address ends with one of the requested suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The candidate key (lowercase hex), i.e. the wallet password
    pub candidate: String,
    /// The derived address
    pub address: Address,
    /// The ID of the worker that found this match
    pub worker_id: usize,
}

/// Everything a worker can report.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// Informational text
    Message { worker_id: usize, text: String },
    /// A solution
    Match(Match),
    /// Cumulative average microseconds per candidate since the worker started
    Throughput { worker_id: usize, micros_per_check: f64 },
    /// The worker cannot continue and has exited
    Fatal { worker_id: usize, text: String },
}

impl WorkerEvent {
    /// Returns the ID of the worker that sent this event.
    pub fn worker_id(&self) -> usize {
        match self {
            WorkerEvent::Message { worker_id, .. }
            | WorkerEvent::Throughput { worker_id, .. }
            | WorkerEvent::Fatal { worker_id, .. } => *worker_id,
            WorkerEvent::Match(found) => found.worker_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive;

    #[test]
    fn test_worker_id() {
        let found = Match {
            candidate: "00".into(),
            address: derive('k', "00"),
            worker_id: 3,
        };
        assert_eq!(WorkerEvent::Match(found).worker_id(), 3);
        assert_eq!(
            WorkerEvent::Throughput {
                worker_id: 1,
                micros_per_check: 2.5
            }
            .worker_id(),
            1
        );
        assert_eq!(
            WorkerEvent::Fatal {
                worker_id: 7,
                text: "boom".into()
            }
            .worker_id(),
            7
        );
    }
}
