//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - The event taxonomy workers report with
//! - Work assignments and their validation
//! - Multi-threaded CPU workers and the pool that owns them

mod assignment;
mod cpu;
mod event;
mod pool;

pub use assignment::{AssignmentError, Work, WorkAssignment, DEFAULT_REPORT_INTERVAL};
pub use cpu::CpuWorker;
pub use event::{Match, WorkerEvent};
pub use pool::WorkerPool;
