//! Merkle membership checks against a cohort's stored root.

use crate::cohort::CohortRegistry;
use cohort_crypto::{hash_address, verify_proof};
use cohort_types::{Address, CohortId, Digest};

/// Whether `proof` shows `address` is in the membership tree of `cohort`.
///
/// Unknown cohorts and cohorts without a root never have members.
pub fn is_member(
    registry: &CohortRegistry,
    address: &Address,
    cohort: CohortId,
    proof: &[Digest],
) -> bool {
    match registry.get(cohort) {
        Some(c) if !c.membership_root.is_zero() => {
            verify_proof(&c.membership_root, &hash_address(address), proof)
        }
        _ => false,
    }
}
