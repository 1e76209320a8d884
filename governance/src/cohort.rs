//! Cohort registry: a fixed-capacity table of cohorts indexed by id.

use crate::error::GovernanceError;
use cohort_types::{Address, CohortId, Digest, MAX_COHORTS};
use serde::{Deserialize, Serialize};

/// A cohort record. Permanent once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: CohortId,
    pub name: String,
    /// Current admin. Changes only through the cohort-admin quorum.
    pub admin: Address,
    pub exists: bool,
    /// Root of the cohort's membership tree. Zero until the admin sets one.
    pub membership_root: Digest,
}

/// Owns every cohort. Slot `i` holds the cohort with id `i`.
#[derive(Clone, Debug)]
pub struct CohortRegistry {
    slots: [Option<Cohort>; MAX_COHORTS],
    count: usize,
}

impl CohortRegistry {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            count: 0,
        }
    }

    /// Create cohort `id`.
    ///
    /// Checks run in order: id range, duplicate id, registry capacity. A full
    /// registry only rejects ids that are new. The caller is responsible for
    /// authorization and admin-address validation.
    pub fn setup(
        &mut self,
        id: CohortId,
        name: impl Into<String>,
        admin: Address,
    ) -> Result<&Cohort, GovernanceError> {
        let slot = id.slot().ok_or(GovernanceError::InvalidId(id))?;
        if self.slots[slot].is_some() {
            return Err(GovernanceError::AlreadySet(id));
        }
        if self.count >= MAX_COHORTS {
            return Err(GovernanceError::CapacityExceeded { max: MAX_COHORTS });
        }
        self.count += 1;
        Ok(self.slots[slot].insert(Cohort {
            id,
            name: name.into(),
            admin,
            exists: true,
            membership_root: Digest::ZERO,
        }))
    }

    pub fn get(&self, id: CohortId) -> Option<&Cohort> {
        id.slot().and_then(|slot| self.slots[slot].as_ref())
    }

    pub fn exists(&self, id: CohortId) -> bool {
        self.get(id).is_some()
    }

    /// Number of cohorts set up so far.
    pub fn total(&self) -> usize {
        self.count
    }

    /// Existing cohorts in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Cohort> {
        self.slots.iter().flatten()
    }

    /// Lowest-id cohort administered by `account`, if any.
    pub fn cohort_of_admin(&self, account: &Address) -> Option<CohortId> {
        self.iter().find(|c| &c.admin == account).map(|c| c.id)
    }

    /// The cohort, provided `caller` is its current admin.
    ///
    /// A missing cohort is reported as `NotCohortAdmin` as well: nobody
    /// administers a slot that was never set up.
    pub fn require_admin(
        &self,
        id: CohortId,
        caller: &Address,
    ) -> Result<&Cohort, GovernanceError> {
        match self.get(id) {
            Some(cohort) if &cohort.admin == caller => Ok(cohort),
            _ => Err(GovernanceError::NotCohortAdmin {
                cohort: id,
                caller: *caller,
            }),
        }
    }

    /// Replace the admin of an existing cohort, returning the previous one.
    pub(crate) fn replace_admin(
        &mut self,
        id: CohortId,
        admin: Address,
    ) -> Result<Address, GovernanceError> {
        let cohort = self.get_mut(id)?;
        Ok(std::mem::replace(&mut cohort.admin, admin))
    }

    /// Overwrite the membership root of an existing cohort.
    pub(crate) fn set_membership_root(
        &mut self,
        id: CohortId,
        root: Digest,
    ) -> Result<(), GovernanceError> {
        self.get_mut(id)?.membership_root = root;
        Ok(())
    }

    fn get_mut(&mut self, id: CohortId) -> Result<&mut Cohort, GovernanceError> {
        id.slot()
            .and_then(|slot| self.slots[slot].as_mut())
            .ok_or(GovernanceError::CohortNotFound(id))
    }
}

impl Default for CohortRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(seed: u8) -> Address {
        Address::new([seed; 20])
    }

    fn full_registry() -> CohortRegistry {
        let mut reg = CohortRegistry::new();
        for (i, name) in ["Red", "Blue", "Green", "Yellow", "Purple"].iter().enumerate() {
            reg.setup(CohortId(i as u32), *name, admin(i as u8 + 1)).unwrap();
        }
        reg
    }

    #[test]
    fn setup_creates_existing_cohort() {
        let mut reg = CohortRegistry::new();
        let cohort = reg.setup(CohortId(0), "Red", admin(1)).unwrap();
        assert!(cohort.exists);
        assert_eq!(cohort.name, "Red");
        assert!(cohort.membership_root.is_zero());
        assert_eq!(reg.total(), 1);
    }

    #[test]
    fn out_of_range_id_is_invalid() {
        let mut reg = CohortRegistry::new();
        assert_eq!(
            reg.setup(CohortId(5), "Green", admin(1)).unwrap_err(),
            GovernanceError::InvalidId(CohortId(5))
        );
        assert_eq!(reg.total(), 0);
    }

    #[test]
    fn duplicate_id_rejected_even_with_new_fields() {
        let mut reg = CohortRegistry::new();
        reg.setup(CohortId(0), "Red", admin(1)).unwrap();
        assert_eq!(
            reg.setup(CohortId(0), "Redd", admin(9)).unwrap_err(),
            GovernanceError::AlreadySet(CohortId(0))
        );
        assert_eq!(reg.get(CohortId(0)).unwrap().name, "Red");
        assert_eq!(reg.get(CohortId(0)).unwrap().admin, admin(1));
    }

    #[test]
    fn full_registry_still_reports_duplicates() {
        let mut reg = full_registry();
        for id in 0..5 {
            assert_eq!(
                reg.setup(CohortId(id), "Extra", admin(99)).unwrap_err(),
                GovernanceError::AlreadySet(CohortId(id))
            );
        }
        assert_eq!(reg.get(CohortId(0)).unwrap().name, "Red");
        assert_eq!(reg.total(), MAX_COHORTS);
    }

    #[test]
    fn require_admin_checks_identity() {
        let mut reg = CohortRegistry::new();
        reg.setup(CohortId(1), "Blue", admin(2)).unwrap();
        assert!(reg.require_admin(CohortId(1), &admin(2)).is_ok());
        assert!(matches!(
            reg.require_admin(CohortId(1), &admin(3)),
            Err(GovernanceError::NotCohortAdmin { .. })
        ));
        assert!(matches!(
            reg.require_admin(CohortId(3), &admin(2)),
            Err(GovernanceError::NotCohortAdmin { .. })
        ));
    }

    #[test]
    fn replace_admin_returns_previous() {
        let mut reg = CohortRegistry::new();
        reg.setup(CohortId(0), "Red", admin(1)).unwrap();
        assert_eq!(reg.replace_admin(CohortId(0), admin(7)).unwrap(), admin(1));
        assert_eq!(reg.get(CohortId(0)).unwrap().admin, admin(7));
        assert_eq!(
            reg.replace_admin(CohortId(2), admin(7)).unwrap_err(),
            GovernanceError::CohortNotFound(CohortId(2))
        );
    }

    #[test]
    fn cohort_of_admin_finds_lowest_id() {
        let mut reg = CohortRegistry::new();
        reg.setup(CohortId(3), "Yellow", admin(4)).unwrap();
        reg.setup(CohortId(1), "Blue", admin(4)).unwrap();
        assert_eq!(reg.cohort_of_admin(&admin(4)), Some(CohortId(1)));
        assert_eq!(reg.cohort_of_admin(&admin(5)), None);
    }

    #[test]
    fn iter_is_ascending_and_skips_gaps() {
        let mut reg = CohortRegistry::new();
        reg.setup(CohortId(4), "Purple", admin(5)).unwrap();
        reg.setup(CohortId(0), "Red", admin(1)).unwrap();
        let ids: Vec<u32> = reg.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![0, 4]);
    }
}
