//! Suffix matching for derived addresses.
//!
//! A candidate matches when its address ends with any one of the requested
//! terms.

mod suffix;

pub use suffix::{MatchResult, SuffixSet, TargetError};
