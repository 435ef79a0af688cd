//! # krist_vanity
//!
//! Multithreaded vanity address generator for Krist v2 addresses.
//!
//! ## Architecture
//!
//! - `crypto`: Address derivation, hashing helpers and candidate keys
//! - `matcher`: Suffix matching
//! - `worker`: Worker threads, their events and the pool that owns them
//! - `coordinator`: Run lifecycle, match counting and throughput aggregation
//! - `report`: Output of coordinator events
//! - `config`: Command-line configuration

pub mod config;
pub mod coordinator;
pub mod crypto;
pub mod matcher;
pub mod report;
pub mod worker;

pub use config::Config;
pub use coordinator::{Outcome, SearchCoordinator, SearchError, SearchOptions};
pub use crypto::{derive, Address};
pub use matcher::{MatchResult, SuffixSet};
pub use report::{ConsoleReporter, Reporter};
pub use worker::{Match, WorkerEvent, WorkerPool};
