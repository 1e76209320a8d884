//! Nullable infrastructure for deterministic testing.
//!
//! Everything the governance engine reads from outside (wall-clock time,
//! caller addresses, the role capability) has a test-friendly stand-in here
//! that returns deterministic values and can be steered programmatically.

pub mod accounts;
pub mod clock;
pub mod roles;

pub use accounts::NullAccounts;
pub use clock::NullClock;
pub use roles::NullRoles;
