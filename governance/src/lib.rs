//! Cohort governance.
//!
//! A small fixed set of cohorts (at most five), each run by one admin, that:
//! - prove individual membership with sorted-pair Merkle roots
//! - open time-boxed proposals and collect one yes-vote per cohort
//! - replace the global admin or any cohort's admin by strict-majority
//!   quorum of cohort admins, after which the tally starts over
//!
//! All state lives in [`GovernanceEngine`]. Authorization is delegated to an
//! injected [`AccessControl`](cohort_access::AccessControl) capability.

pub mod cohort;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod membership;
pub mod proposal;
pub mod quorum;

pub use cohort::{Cohort, CohortRegistry};
pub use config::GovernanceConfig;
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use event::{EventLog, GovernanceEvent};
pub use membership::is_member;
pub use proposal::{Proposal, ProposalBook, ProposalPhase};
pub use quorum::{majority_threshold, QuorumOutcome, QuorumTally};
