//! Scoring seam and the built-in default scorer.
//!
//! The scan engine treats scoring as a pluggable oracle behind the
//! [`Scorer`] trait. The contract the engine relies on:
//!
//! - `score` returns 0.0 to mean "no match"; any positive value is a hit.
//! - Identical inputs always yield identical output.
//! - A positive score implies every distinct letter of the query occurs
//!   somewhere in the candidate. This is what licenses the letter-mask
//!   pre-filter as a lossless prune.
//! - `score_with_positions` is strictly more expensive and is only called
//!   for the final winners, never during the bulk scan.

/// Inputs to a single scoring call. The engine hands over both the
/// original candidate and its pre-folded lowercase form so scorers don't
/// re-fold on the hot path; `query` is already normalized (whitespace
/// stripped, case-folded unless `case_sensitive`).
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub original: &'a str,
    pub lowercase: &'a str,
    pub query: &'a str,
    pub case_sensitive: bool,
}

/// The pluggable relevance oracle consumed by the scan engine.
pub trait Scorer: Send + Sync {
    /// Relevance of `input.query` against the candidate. 0.0 = no match.
    fn score(&self, input: &ScoreInput<'_>) -> f64;

    /// Same scoring, plus the character positions in the candidate that
    /// aligned with the query.
    fn score_with_positions(&self, input: &ScoreInput<'_>) -> (f64, Vec<usize>);
}

/// Score contribution of every aligned query character.
const BASE_CHAR_SCORE: f64 = 1.0;
/// Extra credit when an aligned character directly follows the previous
/// one, so contiguous runs beat scattered alignments.
const ADJACENCY_BONUS: f64 = 1.0;
/// Extra credit when an aligned character starts a word (position 0 or
/// preceded by a non-alphanumeric character).
const WORD_START_BONUS: f64 = 1.5;

/// Default scorer: greedy in-order character alignment.
///
/// Matches iff the query is a subsequence of the candidate. Contiguity
/// and word-start bonuses reward tight, boundary-anchored alignments, and
/// the total is divided by the candidate length so short candidates
/// outrank long ones with the same alignment quality.
///
/// In case-insensitive mode the alignment runs over the pre-folded
/// lowercase form; reported positions index that form (identical to the
/// original string for ASCII content).
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceScorer;

impl SubsequenceScorer {
    fn target<'a>(input: &ScoreInput<'a>) -> &'a str {
        if input.case_sensitive {
            input.original
        } else {
            input.lowercase
        }
    }
}

impl Scorer for SubsequenceScorer {
    fn score(&self, input: &ScoreInput<'_>) -> f64 {
        match align(Self::target(input), input.query) {
            Some((score, _)) => score,
            None => 0.0,
        }
    }

    fn score_with_positions(&self, input: &ScoreInput<'_>) -> (f64, Vec<usize>) {
        match align(Self::target(input), input.query) {
            Some((score, positions)) => (score, positions),
            None => (0.0, Vec::new()),
        }
    }
}

/// Greedy left-to-right alignment of `query` over `text`.
/// Returns the normalized score and matched char positions, or `None`
/// when the query is not a subsequence of the text.
///
/// An empty query trivially aligns: every candidate matches with a
/// neutral score of 1.0 and no positions.
fn align(text: &str, query: &str) -> Option<(f64, Vec<usize>)> {
    if query.is_empty() {
        return Some((1.0, Vec::new()));
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut raw = 0.0;
    let mut wanted = query.chars();
    let mut next_wanted = wanted.next();
    let mut prev_char: Option<char> = None;
    let mut char_count = 0usize;

    for (idx, c) in text.chars().enumerate() {
        char_count += 1;
        if next_wanted == Some(c) {
            raw += BASE_CHAR_SCORE;
            if idx > 0 && positions.last() == Some(&(idx - 1)) {
                raw += ADJACENCY_BONUS;
            }
            let word_start = prev_char.map_or(true, |p| !p.is_alphanumeric());
            if word_start {
                raw += WORD_START_BONUS;
            }
            positions.push(idx);
            next_wanted = wanted.next();
        }
        prev_char = Some(c);
    }

    if next_wanted.is_some() {
        return None;
    }
    Some((raw / char_count as f64, positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(original: &'a str, lowercase: &'a str, query: &'a str) -> ScoreInput<'a> {
        ScoreInput {
            original,
            lowercase,
            query,
            case_sensitive: false,
        }
    }

    fn score(candidate: &str, query: &str) -> f64 {
        let lower = candidate.to_lowercase();
        SubsequenceScorer.score(&input(candidate, &lower, query))
    }

    fn positions(candidate: &str, query: &str) -> Vec<usize> {
        let lower = candidate.to_lowercase();
        SubsequenceScorer
            .score_with_positions(&input(candidate, &lower, query))
            .1
    }

    // ── align ────────────────────────────────────────────────────

    #[test]
    fn test_align_missing_char_is_no_match() {
        assert_eq!(align("hello", "hx"), None);
        assert_eq!(align("", "a"), None);
    }

    #[test]
    fn test_align_empty_query_is_neutral_match() {
        assert_eq!(align("anything", ""), Some((1.0, Vec::new())));
        assert_eq!(align("", ""), Some((1.0, Vec::new())));
    }

    #[test]
    fn test_align_positions_are_in_order() {
        let (_, pos) = align("a_b_c", "abc").unwrap();
        assert_eq!(pos, vec![0, 2, 4]);
    }

    #[test]
    fn test_align_greedy_takes_first_occurrence() {
        let (_, pos) = align("abab", "ab").unwrap();
        assert_eq!(pos, vec![0, 1]);
    }

    // ── scoring preferences ──────────────────────────────────────

    #[test]
    fn test_contiguous_beats_scattered() {
        assert!(score("model", "mode") > score("majordome", "mode"));
    }

    #[test]
    fn test_short_candidate_beats_long_with_same_prefix() {
        assert!(score("map", "map") > score("mapreduce", "map"));
    }

    #[test]
    fn test_word_start_beats_mid_word() {
        // "re" at the start of "remote" vs inside "caret"
        assert!(score("remote", "re") > score("caret", "re"));
    }

    #[test]
    fn test_zero_only_for_non_subsequence() {
        assert!(score("gamma", "ga") > 0.0);
        assert_eq!(score("alpha", "ga"), 0.0);
        assert_eq!(score("beta", "ga"), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = score("deterministic scoring", "dts");
        let b = score("deterministic scoring", "dts");
        assert_eq!(a, b);
    }

    // ── case handling ────────────────────────────────────────────

    #[test]
    fn test_case_insensitive_uses_folded_form() {
        // Query arrives pre-folded in case-insensitive mode.
        assert!(score("FooBar", "foobar") > 0.0);
    }

    #[test]
    fn test_case_sensitive_respects_case() {
        let i = ScoreInput {
            original: "FooBar",
            lowercase: "foobar",
            query: "foobar",
            case_sensitive: true,
        };
        assert_eq!(SubsequenceScorer.score(&i), 0.0);

        let i = ScoreInput {
            original: "FooBar",
            lowercase: "foobar",
            query: "FooBar",
            case_sensitive: true,
        };
        assert!(SubsequenceScorer.score(&i) > 0.0);
    }

    // ── positions ────────────────────────────────────────────────

    #[test]
    fn test_positions_match_query_length() {
        assert_eq!(positions("gamma", "ga").len(), 2);
        assert_eq!(positions("alpha", "ga"), Vec::<usize>::new());
    }

    #[test]
    fn test_positions_word_boundaries() {
        assert_eq!(positions("foo_bar", "fb"), vec![0, 4]);
    }

    #[test]
    fn test_score_with_positions_agrees_with_score() {
        let lower = "candidate".to_string();
        let i = input("candidate", &lower, "cdd");
        let (s, p) = SubsequenceScorer.score_with_positions(&i);
        assert_eq!(s, SubsequenceScorer.score(&i));
        assert_eq!(p.len(), 3);
    }
}
