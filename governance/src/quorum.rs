//! Cross-cohort quorum tallies for admin replacement.
//!
//! Each tally maps a decision key (a candidate, or a target cohort plus a
//! candidate) to the set of cohorts that voted for it. A decision executes once
//! its voter count reaches [`majority_threshold`] of the cohorts that exist at
//! that moment, and its entry is then removed so the next round starts empty.

use cohort_types::{CohortId, CohortSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Votes needed out of `total_cohorts`: strictly more than half.
pub fn majority_threshold(total_cohorts: usize) -> usize {
    total_cohorts / 2 + 1
}

/// What a quorum vote led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumOutcome {
    /// Below threshold. `newly_cast` is false when the cohort had already voted.
    Pending {
        votes: usize,
        threshold: usize,
        newly_cast: bool,
    },
    /// Threshold reached; the mutation ran and the tally was cleared.
    Executed { votes: usize },
}

impl QuorumOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// One vote per cohort per decision key.
///
/// Entries are only removed by [`clear`](Self::clear) when a decision executes.
/// A round that never reaches quorum keeps its entry, so the map grows with the
/// number of distinct keys ever voted on. Each entry is one key plus one byte
/// of voter bits, and only cohort admins can add keys.
#[derive(Clone, Debug)]
pub struct QuorumTally<K> {
    votes: HashMap<K, CohortSet>,
}

impl<K: Eq + Hash> QuorumTally<K> {
    pub fn new() -> Self {
        Self {
            votes: HashMap::new(),
        }
    }

    /// Record `voter` for `key`. Returns `true` on the cohort's first vote.
    pub fn cast(&mut self, key: K, voter: CohortId) -> bool {
        self.votes.entry(key).or_default().insert(voter)
    }

    pub fn has_voted(&self, key: &K, voter: CohortId) -> bool {
        self.votes.get(key).is_some_and(|set| set.contains(voter))
    }

    /// Number of cohorts that voted for `key`.
    pub fn count(&self, key: &K) -> usize {
        self.votes.get(key).map_or(0, CohortSet::len)
    }

    pub fn voters(&self, key: &K) -> CohortSet {
        self.votes.get(key).copied().unwrap_or_default()
    }

    /// Forget every vote for `key`, across all cohorts.
    pub fn clear(&mut self, key: &K) {
        self.votes.remove(key);
    }

    /// Number of decisions with at least one outstanding vote.
    pub fn open_rounds(&self) -> usize {
        self.votes.len()
    }
}

impl<K: Eq + Hash> Default for QuorumTally<K> {
    fn default() -> Self {
        Self::new()
    }
}
