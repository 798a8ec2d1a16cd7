//! Whisker - concurrent top-K fuzzy candidate matching
//!
//! Ranks a large set of candidate strings against a query and returns the
//! top-K best fuzzy matches, built for interactive lookup (autocomplete,
//! fuzzy filtering) over 10k+ candidates: a letter-bitmask pre-filter, a
//! rayon-partitioned scan into per-worker bounded heaps, and an
//! order-independent merge. Scoring is pluggable via the [`Scorer`] trait.

mod candidate;
pub mod interface;
pub mod ranking;
mod search;
mod store;
mod topk;

pub use interface::{MatchError, MatchOptions, MatchResult};
pub use ranking::{ScoreInput, Scorer, SubsequenceScorer};
pub use store::Matcher;
