use cohort_types::Address;
use thiserror::Error;

use crate::role::Role;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("account {account} is missing role {role}")]
    Unauthorized { account: Address, role: Role },
}
