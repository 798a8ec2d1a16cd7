//! Candidate storage and the public matcher API.
//!
//! Candidates live in a dense vector with a key-to-slot index on the
//! side. The dense layout is what makes partitioned scanning trivial:
//! a partition is a contiguous index range, independent of any hash
//! table's internal bucket layout. Removal swaps the last entry into the
//! vacated slot and fixes up its index entry.
//!
//! Concurrency model: `find_matches` borrows the store immutably while
//! `add`/`remove`/`clear` take `&mut self`, so "no mutation during an
//! in-flight scan" is enforced by the borrow checker rather than left as
//! a caller contract.

use std::collections::HashMap;

use crate::candidate::Candidate;
use crate::interface::{MatchError, MatchOptions, MatchResult};
use crate::ranking::{Scorer, SubsequenceScorer};
use crate::search;

#[derive(Debug, Default)]
pub(crate) struct CandidateStore {
    entries: Vec<Candidate>,
    /// Maps the original string to its slot in `entries`.
    slots: HashMap<String, usize>,
}

impl CandidateStore {
    /// Insert a candidate, computing its derived metadata once. Re-adding
    /// an existing key recomputes the metadata in place.
    pub(crate) fn add(&mut self, value: &str) {
        if let Some(&slot) = self.slots.get(value) {
            self.entries[slot] = Candidate::new(value.to_string());
        } else {
            self.slots.insert(value.to_string(), self.entries.len());
            self.entries.push(Candidate::new(value.to_string()));
        }
    }

    /// Remove a candidate. Absent keys are a silent no-op.
    pub(crate) fn remove(&mut self, value: &str) {
        if let Some(slot) = self.slots.remove(value) {
            self.entries.swap_remove(slot);
            if slot < self.entries.len() {
                // The former last entry moved into `slot`.
                let moved = self.entries[slot].original().to_string();
                self.slots.insert(moved, slot);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        self.slots.reserve(additional);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Carve the store into `count` disjoint contiguous partitions that
    /// cover every candidate exactly once. Sizes differ by at most one;
    /// the remainder is spread across the leading partitions.
    pub(crate) fn partitions(&self, count: usize) -> Vec<&[Candidate]> {
        debug_assert!(count > 0);
        let base = self.entries.len() / count;
        let remainder = self.entries.len() % count;
        let mut out = Vec::with_capacity(count);
        let mut start = 0;
        for i in 0..count {
            let size = base + usize::from(i < remainder);
            out.push(&self.entries[start..start + size]);
            start += size;
        }
        out
    }
}

/// Ranks a set of candidate strings against queries and returns the
/// top-K best fuzzy matches.
///
/// Generic over the scoring oracle; defaults to the built-in
/// [`SubsequenceScorer`].
#[derive(Debug, Default)]
pub struct Matcher<S: Scorer = SubsequenceScorer> {
    store: CandidateStore,
    scorer: S,
}

impl Matcher<SubsequenceScorer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Scorer> Matcher<S> {
    /// Build a matcher around a custom scoring oracle.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            store: CandidateStore::default(),
            scorer,
        }
    }

    /// Add a searchable string. The lowercase form and letter mask are
    /// computed here, once, rather than on every query. Re-adding an
    /// existing string refreshes its metadata.
    pub fn add_candidate(&mut self, value: &str) {
        self.store.add(value);
    }

    /// Remove a string from the searchable set. No-op if absent.
    pub fn remove_candidate(&mut self, value: &str) {
        self.store.remove(value);
    }

    /// Remove all candidates.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Pre-size internal storage for at least `additional` more candidates.
    pub fn reserve(&mut self, additional: usize) {
        self.store.reserve(additional);
    }

    /// Number of candidates currently stored.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Rank all candidates against `query` and return the best matches
    /// in descending score order (ties lexicographic by value).
    pub fn find_matches(
        &self,
        query: &str,
        options: &MatchOptions,
    ) -> Result<Vec<MatchResult>, MatchError> {
        search::find_matches(&self.store, &self.scorer, query, options)
    }
}
