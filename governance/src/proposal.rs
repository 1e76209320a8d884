//! Time-boxed proposals and their per-cohort votes.

use crate::error::GovernanceError;
use cohort_types::{CohortId, CohortSet, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of a proposal id: `NonExistent -> Open -> Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalPhase {
    /// No proposal with this id has been made.
    NonExistent,
    /// Accepting votes (`now < deadline`).
    Open,
    /// Window elapsed; the result can be read. Terminal.
    Closed,
}

/// A proposal made by a cohort admin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// The cohort whose admin made the proposal.
    pub cohort: CohortId,
    pub objective: String,
    pub created_at: Timestamp,
    /// First second at which voting is closed.
    pub deadline: Timestamp,
    pub exists: bool,
    pub yes_count: u32,
    /// Cohorts that have voted.
    pub votes: CohortSet,
}

impl Proposal {
    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.deadline
    }

    pub fn phase(&self, now: Timestamp) -> ProposalPhase {
        if self.is_open(now) {
            ProposalPhase::Open
        } else {
            ProposalPhase::Closed
        }
    }
}

/// Every proposal ever made, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ProposalBook {
    proposals: BTreeMap<ProposalId, Proposal>,
    next_id: ProposalId,
}

impl ProposalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a proposal for `cohort` with `deadline = now + timeframe_secs`.
    ///
    /// Authorization is the caller's job.
    pub fn open(
        &mut self,
        cohort: CohortId,
        objective: impl Into<String>,
        timeframe_secs: u64,
        now: Timestamp,
    ) -> Result<&Proposal, GovernanceError> {
        let id = self.next_id;
        // Invariant check: `exists` is set once per id. Unreachable while
        // `next_id` is the only source of ids.
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::ProposalExists(id));
        }
        self.next_id = id.next();
        let proposal = Proposal {
            id,
            cohort,
            objective: objective.into(),
            created_at: now,
            deadline: now.plus_secs(timeframe_secs),
            exists: true,
            yes_count: 0,
            votes: CohortSet::EMPTY,
        };
        Ok(self.proposals.entry(id).or_insert(proposal))
    }

    /// The proposal, provided it exists and its window is open at `now`.
    pub fn require_open(
        &self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(&id)
            .filter(|p| p.is_open(now))
            .ok_or(GovernanceError::VotingNotActive(id))
    }

    /// Record a vote by `voter`. Returns `true` on the cohort's first vote.
    ///
    /// Does not check the window; callers go through [`require_open`](Self::require_open) first.
    pub(crate) fn record_vote(
        &mut self,
        id: ProposalId,
        voter: CohortId,
    ) -> Result<bool, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        let fresh = proposal.votes.insert(voter);
        if fresh {
            proposal.yes_count += 1;
        }
        Ok(fresh)
    }

    /// Final yes count, available once the window has closed.
    pub fn result(&self, id: ProposalId, now: Timestamp) -> Result<u32, GovernanceError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if proposal.is_open(now) {
            return Err(GovernanceError::VotingStillActive(id));
        }
        Ok(proposal.yes_count)
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn phase(&self, id: ProposalId, now: Timestamp) -> ProposalPhase {
        self.proposals
            .get(&id)
            .map_or(ProposalPhase::NonExistent, |p| p.phase(now))
    }

    pub fn has_voted(&self, id: ProposalId, cohort: CohortId) -> bool {
        self.proposals
            .get(&id)
            .is_some_and(|p| p.votes.contains(cohort))
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}
