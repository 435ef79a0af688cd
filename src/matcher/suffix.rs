//! Suffix set matching.

use crate::crypto::{Address, ADDRESS_LEN};

/// Errors produced when building a suffix set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("no search terms given")]
    Empty,

    #[error("search term #{0} is empty")]
    EmptyTerm(usize),
}

/// Result of a match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The address ends with at least one suffix
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A non-empty set of suffixes, OR'd together. Matching is case sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: Vec<String>,
}

impl SuffixSet {
    /// Builds a suffix set, rejecting an empty list or an empty term.
    ///
    /// Duplicate terms are kept once, in first-seen order.
    pub fn new<I, S>(suffixes: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for (i, suffix) in suffixes.into_iter().enumerate() {
            let suffix = suffix.into();
            if suffix.is_empty() {
                return Err(TargetError::EmptyTerm(i));
            }
            if !set.contains(&suffix) {
                set.push(suffix);
            }
        }

        if set.is_empty() {
            return Err(TargetError::Empty);
        }

        Ok(Self { suffixes: set })
    }

    /// Parses a comma separated list, e.g. `"test,foo"`.
    pub fn parse_list(list: &str) -> Result<Self, TargetError> {
        if list.is_empty() {
            return Err(TargetError::Empty);
        }
        Self::new(list.split(','))
    }

    /// Returns the suffixes.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Returns the number of distinct suffixes.
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// Always false; a suffix set holds at least one term.
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Matches an address against every suffix.
    #[inline]
    pub fn matches(&self, address: &Address) -> MatchResult {
        if self.suffixes.iter().any(|s| address.ends_with(s)) {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Returns the estimated number of candidates per match.
    ///
    /// Treats each derived character as uniform over 36 symbols, which the
    /// biased encoding is not, so this is a rough guide only. Terms longer
    /// than an address can never match and are ignored.
    pub fn estimated_difficulty(&self) -> f64 {
        let p: f64 = self
            .suffixes
            .iter()
            .filter(|s| s.len() <= ADDRESS_LEN)
            .map(|s| 36f64.powi(-(s.len() as i32)))
            .sum();
        if p > 0.0 {
            1.0 / p
        } else {
            f64::INFINITY
        }
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        if diff <= 1_000.0 {
            "Very Easy (< 1 second)".into()
        } else if diff <= 100_000.0 {
            "Easy (seconds)".into()
        } else if diff <= 10_000_000.0 {
            "Medium (minutes)".into()
        } else if diff <= 1_000_000_000.0 {
            "Hard (hours)".into()
        } else {
            "Very Hard (days or more)".into()
        }
    }
}
