//! Worker pool management.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::debug;

use super::assignment::WorkAssignment;
use super::cpu::CpuWorker;
use super::event::WorkerEvent;

/// Manages a pool of worker threads.
///
/// Workers are spawned idle and start searching once [`dispatch`] hands
/// them an assignment. Stopping is all-or-nothing through one shared flag.
///
/// [`dispatch`]: WorkerPool::dispatch
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Per-worker assignment channels
    work_txs: Vec<Sender<Arc<WorkAssignment>>>,
    /// Channel receiver for worker events
    event_rx: Receiver<WorkerEvent>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Spawns `num_workers` idle worker threads.
    pub fn spawn(num_workers: usize) -> io::Result<Self> {
        // Unbounded so a worker never blocks on send while the pool shuts down.
        let (event_tx, event_rx) = unbounded();

        let mut pool = Self {
            num_workers,
            handles: Some(Vec::with_capacity(num_workers)),
            work_txs: Vec::with_capacity(num_workers),
            event_rx,
            stop_flag: Arc::new(AtomicBool::new(false)),
        };

        for id in 0..num_workers {
            let (work_tx, work_rx) = bounded(1);
            let event_tx = event_tx.clone();
            let stop_flag = pool.stop_flag.clone();

            // On error the partially built pool is dropped, which stops and
            // joins the threads spawned so far.
            let handle = thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || {
                    let worker = CpuWorker::new(id, work_rx, event_tx, stop_flag);
                    worker.run();
                })?;

            pool.work_txs.push(work_tx);
            if let Some(handles) = pool.handles.as_mut() {
                handles.push(handle);
            }
        }

        debug!("spawned {} worker thread(s)", num_workers);
        Ok(pool)
    }

    /// Sends the same assignment to every worker.
    pub fn dispatch(&mut self, assignment: WorkAssignment) {
        let assignment = Arc::new(assignment);
        for work_tx in self.work_txs.drain(..) {
            // A worker that already exited has nothing left to do with it
            let _ = work_tx.send(assignment.clone());
        }
    }

    /// Waits for the next worker event.
    pub fn wait_for_event(&self, timeout: Duration) -> Result<WorkerEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    /// Attempts to receive an event without blocking.
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops and waits for all workers to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        // Wake workers still waiting for an assignment
        self.work_txs.clear();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_workers_greet_and_accept_work() {
        let mut pool = WorkerPool::spawn(2).unwrap();
        assert_eq!(pool.num_workers(), 2);

        pool.dispatch(WorkAssignment {
            suffixes: vec!["0".into()],
            candidate_bytes: 8,
            report_interval: 50,
        });

        let mut received = [0usize; 2];
        while received.iter().any(|&n| n < 2) {
            if let WorkerEvent::Message { worker_id, .. } = pool.wait_for_event(TIMEOUT).unwrap() {
                received[worker_id] += 1;
            }
        }

        pool.join();
    }

    #[test]
    fn test_stop_before_dispatch_exits_quietly() {
        let pool = WorkerPool::spawn(3).unwrap();
        pool.stop();
        assert!(pool.is_stopped());
        pool.join();
    }

    #[test]
    fn test_bad_assignment_reaches_coordinator() {
        let mut pool = WorkerPool::spawn(1).unwrap();
        pool.dispatch(WorkAssignment {
            suffixes: vec![],
            candidate_bytes: 32,
            report_interval: 100,
        });

        loop {
            match pool.wait_for_event(TIMEOUT).unwrap() {
                WorkerEvent::Fatal { worker_id, .. } => {
                    assert_eq!(worker_id, 0);
                    break;
                }
                WorkerEvent::Message { .. } => continue,
                other => panic!("unexpected event {:?}", other),
            }
        }

        // The worker exited, so the channel drains and then disconnects
        pool.stop();
        assert_eq!(
            pool.wait_for_event(TIMEOUT).unwrap_err(),
            RecvTimeoutError::Disconnected
        );
        assert!(pool.try_recv().is_none());
    }
}
