//! Shared utilities for cohort governance.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, LogFormatError};
pub use time::format_duration;
