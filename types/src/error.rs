//! Parsing and validation errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("cohort id {0} is out of range")]
    InvalidCohortId(u32),
}
