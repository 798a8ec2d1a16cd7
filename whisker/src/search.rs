//! Top-K scan pipeline: query normalization, bitmask pruning, the
//! partitioned parallel scan, bounded merge, and finalize.
//!
//! Workers hold read-only access to disjoint index ranges of the store,
//! so the scan needs no locks. Each worker feeds a private bounded
//! selector; the merge re-applies the same admission rule, which makes
//! the combined result independent of worker scheduling. Expensive
//! per-character position recording is deferred to the final winners.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use crate::candidate::{letter_mask, Candidate};
use crate::interface::{MatchError, MatchOptions, MatchResult};
use crate::ranking::{ScoreInput, Scorer};
use crate::store::CandidateStore;
use crate::topk::{ScanHit, TopK};

/// Below this many candidates a fan-out is slower than just scanning,
/// so the scan runs synchronously regardless of `worker_count`.
pub(crate) const PARALLEL_SCAN_THRESHOLD: usize = 10_000;

/// A query ready for scanning: whitespace stripped, case-folded unless
/// the call is case-sensitive, letter mask precomputed.
#[derive(Debug)]
pub(crate) struct NormalizedQuery {
    pub(crate) text: String,
    pub(crate) mask: u32,
}

pub(crate) fn normalize_query(raw: &str, case_sensitive: bool) -> NormalizedQuery {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let text = if case_sensitive {
        stripped
    } else {
        stripped.to_lowercase()
    };
    let mask = letter_mask(&text);
    NormalizedQuery { text, mask }
}

pub(crate) fn find_matches<S: Scorer>(
    store: &CandidateStore,
    scorer: &S,
    query: &str,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>, MatchError> {
    // A panicking scorer must not leak partial results or poison the
    // caller; the whole query fails instead.
    catch_unwind(AssertUnwindSafe(|| {
        scan_and_rank(store, scorer, query, options)
    }))
    .map_err(|_| MatchError::ScorerPanicked)
}

fn scan_and_rank<S: Scorer>(
    store: &CandidateStore,
    scorer: &S,
    raw_query: &str,
    options: &MatchOptions,
) -> Vec<MatchResult> {
    let query = normalize_query(raw_query, options.case_sensitive);
    let capacity = if options.max_results == 0 {
        usize::MAX
    } else {
        options.max_results
    };

    #[cfg(feature = "perf-log")]
    let t0 = std::time::Instant::now();

    let combined = if options.worker_count == 0 || store.len() < PARALLEL_SCAN_THRESHOLD {
        scan_partition(scorer, &query, options, capacity, store.entries())
    } else {
        let selectors: Vec<TopK<'_>> = store
            .partitions(options.worker_count)
            .into_par_iter()
            .map(|chunk| scan_partition(scorer, &query, options, capacity, chunk))
            .collect();

        let mut combined = TopK::new(capacity);
        for selector in selectors {
            combined.merge(selector);
        }
        combined
    };

    #[cfg(feature = "perf-log")]
    let t1 = std::time::Instant::now();
    #[cfg(feature = "perf-log")]
    let selected = combined.len();

    let results = finalize(scorer, &query, options, combined);

    #[cfg(feature = "perf-log")]
    {
        let t2 = std::time::Instant::now();
        eprintln!(
            "[perf] scan={:.1}ms finalize={:.1}ms candidates={} selected={}",
            (t1 - t0).as_secs_f64() * 1000.0,
            (t2 - t1).as_secs_f64() * 1000.0,
            store.len(),
            selected,
        );
    }

    results
}

/// Scan one contiguous chunk of the store into a private selector.
/// The letter-mask test prunes most non-matches with a single integer
/// comparison before the scorer ever runs.
fn scan_partition<'a, S: Scorer>(
    scorer: &S,
    query: &NormalizedQuery,
    options: &MatchOptions,
    capacity: usize,
    chunk: &'a [Candidate],
) -> TopK<'a> {
    let mut selected = TopK::new(capacity);
    for candidate in chunk {
        if query.mask & candidate.mask() != query.mask {
            continue;
        }
        let score = scorer.score(&ScoreInput {
            original: candidate.original(),
            lowercase: candidate.lowercase(),
            query: &query.text,
            case_sensitive: options.case_sensitive,
        });
        if score > 0.0 {
            selected.insert(ScanHit {
                score,
                value: candidate.original(),
            });
        }
    }
    selected
}

/// Turn the combined selector into the final strongest-first result list,
/// computing aligned positions only now, for the winners.
fn finalize<S: Scorer>(
    scorer: &S,
    query: &NormalizedQuery,
    options: &MatchOptions,
    combined: TopK<'_>,
) -> Vec<MatchResult> {
    combined
        .into_descending()
        .into_iter()
        .map(|hit| {
            let match_indexes = if options.record_match_indexes {
                // Only the original string survives the heap; re-fold
                // here, bounded by the number of winners.
                let lowercase = hit.value.to_lowercase();
                let (_, positions) = scorer.score_with_positions(&ScoreInput {
                    original: hit.value,
                    lowercase: &lowercase,
                    query: &query.text,
                    case_sensitive: options.case_sensitive,
                });
                Some(positions)
            } else {
                None
            };
            MatchResult {
                score: hit.score,
                value: hit.value.to_string(),
                match_indexes,
            }
        })
        .collect()
}
