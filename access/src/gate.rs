//! The authorization capability and its in-memory implementation.

use crate::error::AccessError;
use crate::role::Role;
use cohort_types::Address;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Role-check capability injected into the governance engine.
///
/// Implementations decide where role membership lives; the engine only needs
/// these four operations.
pub trait AccessControl {
    /// Whether `account` currently holds `role`.
    fn has_role(&self, role: Role, account: &Address) -> bool;

    /// Grant `role` to `account`. Returns `true` if the account did not hold it.
    fn grant_role(&mut self, role: Role, account: &Address) -> bool;

    /// Revoke `role` from `account`. Returns `true` if the account held it.
    fn revoke_role(&mut self, role: Role, account: &Address) -> bool;

    /// Current holders of `role`, in ascending address order.
    fn members(&self, role: Role) -> Vec<Address>;
}

/// Fail with [`AccessError::Unauthorized`] unless `account` holds `role`.
pub fn require_role<A: AccessControl + ?Sized>(
    roles: &A,
    role: Role,
    account: &Address,
) -> Result<(), AccessError> {
    if roles.has_role(role, account) {
        Ok(())
    } else {
        warn!(%account, %role, "role check failed");
        Err(AccessError::Unauthorized {
            account: *account,
            role,
        })
    }
}

/// In-memory role membership table.
#[derive(Clone, Debug, Default)]
pub struct RoleTable {
    holders: HashMap<Role, BTreeSet<Address>>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table where `admin` holds both `DefaultAdmin` and `TechAdmin`.
    pub fn with_admin(admin: Address) -> Self {
        let mut table = Self::new();
        table.grant_role(Role::DefaultAdmin, &admin);
        table.grant_role(Role::TechAdmin, &admin);
        table
    }
}

impl AccessControl for RoleTable {
    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.holders
            .get(&role)
            .is_some_and(|set| set.contains(account))
    }

    fn grant_role(&mut self, role: Role, account: &Address) -> bool {
        self.holders.entry(role).or_default().insert(*account)
    }

    fn revoke_role(&mut self, role: Role, account: &Address) -> bool {
        match self.holders.get_mut(&role) {
            Some(set) => {
                let removed = set.remove(account);
                if set.is_empty() {
                    self.holders.remove(&role);
                }
                removed
            }
            None => false,
        }
    }

    fn members(&self, role: Role) -> Vec<Address> {
        self.holders
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
