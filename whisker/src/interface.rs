//! Public interface types for the matcher.
//!
//! This file is the source of truth for the options, results, and errors
//! exposed to callers.

use thiserror::Error;

/// Options controlling a single `find_matches` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOptions {
    /// Match without case-folding the query or candidates.
    pub case_sensitive: bool,
    /// Number of scan partitions. 0 forces a single synchronous scan;
    /// small candidate sets also scan synchronously regardless of this
    /// setting, since fan-out overhead would dominate.
    pub worker_count: usize,
    /// Maximum number of results to return. 0 means unbounded: every
    /// positive-scoring candidate is returned.
    pub max_results: usize,
    /// Compute the aligned character positions for each returned result.
    /// Positions are only ever computed for the final winners, never
    /// during the bulk scan.
    pub record_match_indexes: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            worker_count: 0,
            max_results: 0,
            record_match_indexes: false,
        }
    }
}

/// A single ranked match.
///
/// `value` is an owned copy of the candidate string: results stay valid
/// across later store mutations. Only the final top-K is ever copied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    /// Relevance score from the scorer. Strictly positive; candidates the
    /// scorer rejects (score 0) never produce a result.
    pub score: f64,
    /// The matched candidate string.
    pub value: String,
    /// Character positions in the candidate that aligned with the query.
    /// Present only when `record_match_indexes` was requested.
    pub match_indexes: Option<Vec<usize>>,
}

/// Error type for matcher operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A scorer call panicked during the scan. No partial results are
    /// returned; the query as a whole fails.
    #[error("scorer panicked during scan")]
    ScorerPanicked,
}
