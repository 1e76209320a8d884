//! Fundamental types for cohort governance.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, 32-byte digests, cohort and proposal identifiers, and timestamps.

pub mod address;
pub mod error;
pub mod hash;
pub mod ids;
pub mod time;

pub use address::Address;
pub use error::TypesError;
pub use hash::Digest;
pub use ids::{CohortId, CohortSet, ProposalId, MAX_COHORTS};
pub use time::Timestamp;
