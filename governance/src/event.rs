//! Observations emitted by the engine for indexers and tests.
//!
//! Events are appended to an [`EventLog`] owned by the engine, in the order the
//! state changes happened. Nothing is broadcast implicitly; consumers read or
//! drain the log.

use cohort_access::Role;
use cohort_types::{Address, CohortId, Digest, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// A state change performed by the governance engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    /// A cohort was set up.
    CohortCreated {
        cohort: CohortId,
        name: String,
        admin: Address,
    },
    /// A cohort admin replaced the cohort's membership root.
    MembershipRootSet { cohort: CohortId, root: Digest },
    /// A cohort admin opened a proposal.
    ProposalCreated {
        proposal: ProposalId,
        cohort: CohortId,
        objective: String,
        deadline: Timestamp,
    },
    /// A cohort voted on a proposal for the first time.
    VoteCast {
        proposal: ProposalId,
        cohort: CohortId,
        yes_count: u32,
    },
    /// Quorum promoted a candidate to global admin.
    DefaultAdminChanged { candidate: Address, votes: usize },
    /// Quorum replaced a cohort's admin.
    CohortAdminChanged {
        cohort: CohortId,
        previous: Address,
        candidate: Address,
        votes: usize,
    },
    /// A role was granted outside the quorum path.
    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },
    /// A role was revoked or renounced.
    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },
}

/// Append-only log of [`GovernanceEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GovernanceEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GovernanceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand all buffered events to the caller, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Newline-delimited JSON, one event per line.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}
