//! Cohort and proposal identifiers, plus the per-cohort flag set used by every tally.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed capacity of the cohort registry. Not resizable.
pub const MAX_COHORTS: usize = 5;

/// Identifier of a cohort.
///
/// Any `u32` can be carried (callers may submit out-of-range ids); only ids
/// below [`MAX_COHORTS`] address a registry slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortId(pub u32);

impl CohortId {
    /// Registry slot for this id, or `None` if it is out of range.
    pub fn slot(&self) -> Option<usize> {
        let idx = self.0 as usize;
        (idx < MAX_COHORTS).then_some(idx)
    }

    /// Like [`slot`](Self::slot) but as a `Result`.
    pub fn checked_slot(&self) -> Result<usize, TypesError> {
        self.slot().ok_or(TypesError::InvalidCohortId(self.0))
    }

    /// All ids that address a registry slot, in ascending order.
    pub fn all() -> impl Iterator<Item = CohortId> {
        (0..MAX_COHORTS as u32).map(CohortId)
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cohort#{}", self.0)
    }
}

impl From<u32> for CohortId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Identifier of a proposal. Assigned sequentially from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub u64);

impl ProposalId {
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proposal#{}", self.0)
    }
}

impl From<u64> for ProposalId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A set of cohort ids, one bit per registry slot.
///
/// Every vote relation keyed by voter cohort (proposal votes, admin-change
/// tallies) stores its voters in one of these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortSet(u8);

const _: () = assert!(MAX_COHORTS <= u8::BITS as usize);

impl CohortSet {
    pub const EMPTY: Self = Self(0);

    /// Add a cohort. Returns `true` if it was not already present.
    ///
    /// Out-of-range ids are never inserted.
    pub fn insert(&mut self, id: CohortId) -> bool {
        match id.slot() {
            Some(slot) => {
                let bit = 1u8 << slot;
                let fresh = self.0 & bit == 0;
                self.0 |= bit;
                fresh
            }
            None => false,
        }
    }

    pub fn contains(&self, id: CohortId) -> bool {
        id.slot().is_some_and(|slot| self.0 & (1u8 << slot) != 0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = CohortId> + '_ {
        CohortId::all().filter(move |id| self.contains(*id))
    }
}

impl FromIterator<CohortId> for CohortSet {
    fn from_iter<I: IntoIterator<Item = CohortId>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_bounds() {
        assert_eq!(CohortId(0).slot(), Some(0));
        assert_eq!(CohortId(4).slot(), Some(4));
        assert_eq!(CohortId(5).slot(), None);
        assert_eq!(
            CohortId(10).checked_slot(),
            Err(TypesError::InvalidCohortId(10))
        );
    }

    #[test]
    fn set_insert_reports_freshness() {
        let mut set = CohortSet::EMPTY;
        assert!(set.insert(CohortId(2)));
        assert!(!set.insert(CohortId(2)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(CohortId(2)));
        assert!(!set.contains(CohortId(1)));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut set = CohortSet::EMPTY;
        assert!(!set.insert(CohortId(7)));
        assert!(set.is_empty());
        assert!(!set.contains(CohortId(7)));
    }

    #[test]
    fn set_iter_is_ascending() {
        let set: CohortSet = [CohortId(3), CohortId(0), CohortId(2)].into_iter().collect();
        let ids: Vec<u32> = set.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn set_clear() {
        let mut set: CohortSet = CohortId::all().collect();
        assert_eq!(set.len(), MAX_COHORTS);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn proposal_id_next() {
        assert_eq!(ProposalId(0).next(), ProposalId(1));
    }
}
