//! CPU-based worker for vanity address search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::crypto::{derive, Candidate, ADDRESS_PREFIX};

use super::assignment::{Work, WorkAssignment};
use super::event::{Match, WorkerEvent};

/// A CPU worker that derives addresses from random candidates.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// Channel delivering the work assignment
    work_rx: Receiver<Arc<WorkAssignment>>,
    /// Channel to report events
    event_tx: Sender<WorkerEvent>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        work_rx: Receiver<Arc<WorkAssignment>>,
        event_tx: Sender<WorkerEvent>,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id,
            work_rx,
            event_tx,
            stop_flag,
        }
    }

    /// Runs the worker.
    ///
    /// Waits for an assignment, validates it, then searches until the stop
    /// flag is set. A missing or invalid assignment is reported as fatal and
    /// the worker exits.
    pub fn run(&self) {
        self.message("Hello! Waiting for work.");

        let assignment = match self.work_rx.recv() {
            Ok(assignment) => assignment,
            Err(_) => {
                if !self.is_stopped() {
                    self.fatal("Work channel closed before an assignment arrived.");
                }
                return;
            }
        };

        self.message("Received work!");

        match assignment.validate() {
            Ok(work) => self.search(&work),
            Err(e) => self.fatal(&format!("Refusing work assignment: {}", e)),
        }
    }

    /// The search loop.
    fn search(&self, work: &Work) {
        let mut rng = StdRng::from_entropy();
        let start = Instant::now();
        let mut counter: u64 = 0;

        debug!(
            "worker {} searching {} term(s) with {}-byte candidates",
            self.id,
            work.targets.len(),
            work.candidate_bytes
        );

        while !self.is_stopped() {
            counter += 1;

            let candidate = Candidate::generate(&mut rng, work.candidate_bytes).to_hex();
            let address = derive(ADDRESS_PREFIX, &candidate);

            if work.targets.matches(&address).is_match() {
                let found = Match {
                    candidate,
                    address,
                    worker_id: self.id,
                };
                if !self.send(WorkerEvent::Match(found)) {
                    break;
                }
            }

            if counter % work.report_interval == 0 {
                let micros_per_check = start.elapsed().as_secs_f64() * 1e6 / counter as f64;
                let sample = WorkerEvent::Throughput {
                    worker_id: self.id,
                    micros_per_check,
                };
                if !self.send(sample) {
                    break;
                }
            }
        }

        debug!("worker {} stopped after {} candidates", self.id, counter);
    }

    /// Sends an event; false once the coordinator has gone away.
    fn send(&self, event: WorkerEvent) -> bool {
        self.event_tx.send(event).is_ok()
    }

    fn message(&self, text: &str) {
        self.send(WorkerEvent::Message {
            worker_id: self.id,
            text: text.to_owned(),
        });
    }

    fn fatal(&self, text: &str) {
        self.send(WorkerEvent::Fatal {
            worker_id: self.id,
            text: text.to_owned(),
        });
    }

    fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use std::thread;
    use std::time::Duration;

    fn spawn_worker(
        assignment: Option<WorkAssignment>,
    ) -> (
        Receiver<WorkerEvent>,
        Arc<AtomicBool>,
        thread::JoinHandle<()>,
    ) {
        let (work_tx, work_rx) = bounded(1);
        let (event_tx, event_rx) = unbounded();
        let stop_flag = Arc::new(AtomicBool::new(false));

        let worker = CpuWorker::new(4, work_rx, event_tx, stop_flag.clone());
        assert_eq!(worker.id(), 4);
        let handle = thread::spawn(move || worker.run());

        if let Some(assignment) = assignment {
            work_tx.send(Arc::new(assignment)).unwrap();
        }
        drop(work_tx);

        (event_rx, stop_flag, handle)
    }

    fn next(rx: &Receiver<WorkerEvent>) -> WorkerEvent {
        rx.recv_timeout(Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_finds_match_and_reports_throughput() {
        let (rx, stop_flag, handle) = spawn_worker(Some(WorkAssignment {
            suffixes: vec!["a".into(), "b".into()],
            candidate_bytes: 16,
            report_interval: 10,
        }));

        assert!(matches!(next(&rx), WorkerEvent::Message { worker_id: 4, .. }));
        assert!(matches!(next(&rx), WorkerEvent::Message { worker_id: 4, .. }));

        let mut found = None;
        let mut sampled = false;
        while found.is_none() || !sampled {
            match next(&rx) {
                WorkerEvent::Match(m) => found = Some(m),
                WorkerEvent::Throughput {
                    worker_id,
                    micros_per_check,
                } => {
                    assert_eq!(worker_id, 4);
                    assert!(micros_per_check.is_finite() && micros_per_check >= 0.0);
                    sampled = true;
                }
                other => panic!("unexpected event {:?}", other),
            }
        }

        stop_flag.store(true, Ordering::Relaxed);
        handle.join().unwrap();

        let found = found.unwrap();
        assert_eq!(found.worker_id, 4);
        assert_eq!(found.candidate.len(), 32);
        assert!(found.address.ends_with("a") || found.address.ends_with("b"));
        assert_eq!(derive('k', &found.candidate), found.address);
    }

    #[test]
    fn test_invalid_assignment_is_fatal() {
        let (rx, _stop_flag, handle) = spawn_worker(Some(WorkAssignment {
            suffixes: vec![],
            candidate_bytes: 32,
            report_interval: 100,
        }));
        handle.join().unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2], WorkerEvent::Fatal { worker_id: 4, .. }));
    }

    #[test]
    fn test_missing_assignment_is_fatal() {
        let (rx, _stop_flag, handle) = spawn_worker(None);
        handle.join().unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], WorkerEvent::Fatal { .. }));
    }
}
