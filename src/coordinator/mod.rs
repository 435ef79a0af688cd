//! Search coordination.
//!
//! One [`SearchCoordinator`] exists per run. It self-tests the derivation,
//! spawns the worker pool, serializes worker events into a single ordered
//! stream, and stops every worker at once when the requested number of
//! matches is reached or a fatal error occurs.

mod options;
mod search;
mod throughput;

pub use options::SearchOptions;
pub use search::{Outcome, SearchCoordinator, SearchError, SearchSummary, State};
pub use throughput::{ThroughputReport, ThroughputWindow, THROUGHPUT_WINDOW};
