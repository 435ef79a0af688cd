//! The search coordinator.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use log::{debug, warn};

use crate::crypto::{self, derive, is_candidate_hex, AddressError, ADDRESS_PREFIX};
use crate::report::Reporter;
use crate::worker::{Match, WorkerEvent, WorkerPool};

use super::options::SearchOptions;
use super::throughput::ThroughputWindow;

/// How often the coordinator wakes up to check for interruption.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Every way a search can abort.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("integrity failure: {0}")]
    Integrity(AddressError),

    #[error("worker {worker_id} cannot operate: {reason}")]
    Protocol { worker_id: usize, reason: String },

    #[error("malformed data from {}: {reason}", source_name(.worker_id))]
    Transport {
        worker_id: Option<usize>,
        reason: String,
    },

    #[error("interrupted")]
    Interrupted,

    #[error("failed to spawn workers: {0}")]
    Spawn(#[from] io::Error),
}

fn source_name(worker_id: &Option<usize>) -> String {
    match worker_id {
        Some(id) => format!("worker {}", id),
        None => "worker pool".to_string(),
    }
}

impl SearchError {
    /// Returns the worker responsible, if any.
    pub fn worker_id(&self) -> Option<usize> {
        match self {
            SearchError::Protocol { worker_id, .. } => Some(*worker_id),
            SearchError::Transport { worker_id, .. } => *worker_id,
            _ => None,
        }
    }
}

/// Coordinator lifecycle. `Running` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Completed,
    Aborted,
}

/// What a finished search produced.
#[derive(Debug)]
pub struct SearchSummary {
    /// Matches in the order they were processed
    pub matches: Vec<Match>,
    /// Wall time from start to the last processed event
    pub elapsed: Duration,
}

/// Terminal result of a run.
#[derive(Debug)]
pub enum Outcome {
    Completed(SearchSummary),
    Aborted(SearchError),
}

impl Outcome {
    /// Process exit code: 0 when completed, 1 when aborted.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed(_) => 0,
            Outcome::Aborted(_) => 1,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

/// Owns the worker pool for one search and aggregates its events.
pub struct SearchCoordinator {
    options: SearchOptions,
    state: State,
    matches: Vec<Match>,
    throughput: ThroughputWindow,
    interrupt: Arc<AtomicBool>,
    start_time: Instant,
}

impl SearchCoordinator {
    /// Creates a coordinator. Nothing is spawned until [`run`].
    ///
    /// [`run`]: SearchCoordinator::run
    pub fn new(options: SearchOptions) -> Self {
        let start_time = Instant::now();
        Self {
            throughput: ThroughputWindow::new(options.workers, start_time),
            options,
            state: State::Running,
            matches: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
            start_time,
        }
    }

    /// Returns a flag that aborts the search when set (e.g. from Ctrl-C).
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Matches processed so far.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Runs the search to a terminal state.
    ///
    /// Verifies the derivation first; nothing is spawned if that fails.
    /// Workers are stopped as a unit as soon as the target is reached or
    /// anything goes wrong.
    pub fn run<R: Reporter>(mut self, reporter: &mut R) -> Outcome {
        if let Err(e) = crypto::self_test() {
            return self.abort(SearchError::Integrity(e), None, reporter);
        }
        debug!("derivation self-test passed");

        self.start_time = Instant::now();
        self.throughput = ThroughputWindow::new(self.options.workers, self.start_time);

        reporter.message(
            None,
            &format!("Dispatching {} worker(s)...", self.options.workers),
        );
        let mut pool = match WorkerPool::spawn(self.options.workers) {
            Ok(pool) => pool,
            Err(e) => return self.abort(SearchError::Spawn(e), None, reporter),
        };

        reporter.message(None, "All workers dispatched, sending work...");
        pool.dispatch(self.options.assignment());

        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                return self.abort(SearchError::Interrupted, Some(pool), reporter);
            }

            let event = match pool.wait_for_event(POLL_INTERVAL) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    let err = SearchError::Transport {
                        worker_id: None,
                        reason: "event channel closed while searching".into(),
                    };
                    return self.abort(err, Some(pool), reporter);
                }
            };

            match self.handle_event(event, Instant::now(), reporter) {
                Ok(State::Running) => {}
                Ok(_) => {
                    reporter.message(None, "Killing all workers...");
                    pool.join();
                    return Outcome::Completed(SearchSummary {
                        matches: self.matches,
                        elapsed: self.start_time.elapsed(),
                    });
                }
                Err(e) => return self.abort(e, Some(pool), reporter),
            }
        }
    }

    /// Processes one worker event received at `now`.
    ///
    /// Returns the state after the event. An error moves the coordinator to
    /// `Aborted`; the caller is responsible for reporting it and stopping
    /// the pool. Events arriving after a terminal state are ignored.
    pub fn handle_event<R: Reporter>(
        &mut self,
        event: WorkerEvent,
        now: Instant,
        reporter: &mut R,
    ) -> Result<State, SearchError> {
        if self.state != State::Running {
            debug!("ignoring event from worker {} after shutdown", event.worker_id());
            return Ok(self.state);
        }

        let result = self.apply(event, now, reporter);
        match result {
            Ok(state) => self.state = state,
            Err(_) => self.state = State::Aborted,
        }
        result
    }

    fn apply<R: Reporter>(
        &mut self,
        event: WorkerEvent,
        now: Instant,
        reporter: &mut R,
    ) -> Result<State, SearchError> {
        match event {
            WorkerEvent::Message { worker_id, text } => {
                reporter.message(Some(worker_id), &text);
                Ok(State::Running)
            }
            WorkerEvent::Match(found) => {
                self.validate_match(&found)
                    .map_err(|reason| SearchError::Transport {
                        worker_id: Some(found.worker_id),
                        reason,
                    })?;

                self.matches.push(found);
                let running = self.matches.len();
                if let Some(found) = self.matches.last() {
                    reporter.matched(found, running, self.options.target);
                }

                if running >= self.options.target {
                    Ok(State::Completed)
                } else {
                    Ok(State::Running)
                }
            }
            WorkerEvent::Throughput {
                worker_id,
                micros_per_check,
            } => {
                if !micros_per_check.is_finite() || micros_per_check < 0.0 {
                    return Err(SearchError::Transport {
                        worker_id: Some(worker_id),
                        reason: format!("invalid throughput sample {}", micros_per_check),
                    });
                }
                if let Some(report) = self.throughput.record(micros_per_check, now) {
                    reporter.throughput(&report);
                }
                Ok(State::Running)
            }
            WorkerEvent::Fatal { worker_id, text } => Err(SearchError::Protocol {
                worker_id,
                reason: text,
            }),
        }
    }

    /// Checks that a reported match is something a worker could have found.
    fn validate_match(&self, found: &Match) -> Result<(), String> {
        if found.worker_id >= self.options.workers {
            return Err(format!("unknown worker id {}", found.worker_id));
        }
        if !is_candidate_hex(&found.candidate, self.options.candidate_bytes) {
            return Err(format!("candidate {:?} is not valid hex", found.candidate));
        }
        if !self.options.suffixes.iter().any(|s| found.address.ends_with(s)) {
            return Err(format!("address {} matches no search term", found.address));
        }
        if derive(ADDRESS_PREFIX, &found.candidate) != found.address {
            return Err(format!(
                "address {} does not derive from its candidate",
                found.address
            ));
        }
        Ok(())
    }

    fn abort<R: Reporter>(
        mut self,
        err: SearchError,
        pool: Option<WorkerPool>,
        reporter: &mut R,
    ) -> Outcome {
        self.state = State::Aborted;
        warn!("aborting search: {}", err);
        if let Some(pool) = pool {
            reporter.message(None, "Killing all workers...");
            pool.join();
        }
        reporter.fatal(err.worker_id(), &err.to_string());
        Outcome::Aborted(err)
    }
}
