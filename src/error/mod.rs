//! Error handling for dependency-guardian
//!
//! Error types, the crate-wide result alias, and error context utilities.

pub mod context;
pub mod types;

pub use context::{handle_error, try_with_recovery, OptionExt, ResultExt};
pub use types::{ErrorSeverity, GuardianError, Result};
