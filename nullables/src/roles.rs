//! Nullable role capability: grants everything, records every mutation.

use cohort_access::{AccessControl, Role};
use cohort_types::Address;

/// An [`AccessControl`] that answers `true` to every role check.
///
/// Grants and revokes are appended to a log so tests can assert the engine
/// asked for them, without any role bookkeeping getting in the way.
#[derive(Default)]
pub struct NullRoles {
    granted: Vec<(Role, Address)>,
    revoked: Vec<(Role, Address)>,
}

impl NullRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn granted(&self) -> &[(Role, Address)] {
        &self.granted
    }

    pub fn revoked(&self) -> &[(Role, Address)] {
        &self.revoked
    }
}

impl AccessControl for NullRoles {
    fn has_role(&self, _role: Role, _account: &Address) -> bool {
        true
    }

    fn grant_role(&mut self, role: Role, account: &Address) -> bool {
        self.granted.push((role, *account));
        true
    }

    fn revoke_role(&mut self, role: Role, account: &Address) -> bool {
        self.revoked.push((role, *account));
        true
    }

    fn members(&self, role: Role) -> Vec<Address> {
        self.granted
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, a)| *a)
            .collect()
    }
}
