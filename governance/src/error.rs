use cohort_access::{AccessError, Role};
use cohort_types::{Address, CohortId, ProposalId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("account {account} is missing role {role}")]
    Unauthorized { account: Address, role: Role },

    #[error("cohort id {0} not valid")]
    InvalidId(CohortId),

    #[error("{0} already set")]
    AlreadySet(CohortId),

    #[error("all {max} cohorts already set up")]
    CapacityExceeded { max: usize },

    #[error("{caller} is not the admin of {cohort}")]
    NotCohortAdmin { cohort: CohortId, caller: Address },

    #[error("current admin of {0} cannot vote on its own replacement")]
    SelfVoteForbidden(CohortId),

    #[error("voting not active for {0}")]
    VotingNotActive(ProposalId),

    #[error("voting still active for {0}")]
    VotingStillActive(ProposalId),

    #[error("{0} not found")]
    ProposalNotFound(ProposalId),

    #[error("{0} already exists")]
    ProposalExists(ProposalId),

    #[error("{0} not found")]
    CohortNotFound(CohortId),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<AccessError> for GovernanceError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized { account, role } => Self::Unauthorized { account, role },
        }
    }
}
