//! Role-based authorization for cohort governance.
//!
//! Three roles gate every mutating call:
//! - **DefaultAdmin**: the global administrator, and the admin role of every role
//! - **TechAdmin**: sets up cohorts
//! - **TokenAdmin**: held by the engine on the external token contract; carried
//!   here so the surrounding system can check it at cohort-setup boundaries
//!
//! The engine never consults roles through ambient state. It owns one
//! [`AccessControl`] capability and asks it before any write.

pub mod error;
pub mod gate;
pub mod role;

pub use error::AccessError;
pub use gate::{require_role, AccessControl, RoleTable};
pub use role::Role;
