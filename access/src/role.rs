//! The three governance roles and their stable identifiers.

use cohort_crypto::blake2b_256;
use cohort_types::Digest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A role an account can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Global administrator. Admin role of every role, including itself.
    DefaultAdmin,
    /// Technical administrator. Required to set up cohorts.
    TechAdmin,
    /// Token administrator on the external token contract.
    TokenAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::DefaultAdmin, Role::TechAdmin, Role::TokenAdmin];

    /// Canonical name, also the preimage of the role id.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Self::TechAdmin => "TECH_ADMIN",
            Self::TokenAdmin => "TOKEN_ADMIN",
        }
    }

    /// 32-byte role identifier.
    ///
    /// `DefaultAdmin` is the zero digest; the others hash their canonical name.
    pub fn id(&self) -> Digest {
        match self {
            Self::DefaultAdmin => Digest::ZERO,
            other => Digest::new(blake2b_256(other.name().as_bytes())),
        }
    }

    /// The role whose holders may grant and revoke this one.
    pub fn admin_role(&self) -> Role {
        Role::DefaultAdmin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
