//! Error context utilities
//!
//! Helpers for turning foreign errors into scan failures and for deciding, by
//! severity, whether an error is logged and swallowed or propagated.

use crate::error::{ErrorSeverity, GuardianError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Turn the error into a scan failure for the given package directory
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| GuardianError::Parse {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Handle an error based on its severity
///
/// Warnings and regular errors are logged and swallowed (`None`); critical
/// errors are logged and handed back to the caller.
pub fn handle_error(err: GuardianError) -> Option<GuardianError> {
    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!(error = %err, "continuing after recoverable error");
            None
        }
        ErrorSeverity::Error => {
            tracing::error!(error = %err, "operation failed, continuing");
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!(error = %err, "critical error");
            Some(err)
        }
    }
}

/// Run a function and recover from non-critical errors
///
/// Returns `Ok(Some(value))` on success, `Ok(None)` when a non-critical error
/// was logged, and `Err` for critical errors.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match handle_error(err) {
            Some(critical) => Err(critical),
            None => Ok(None),
        },
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GuardianError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GuardianError,
    {
        self.ok_or_else(err_fn)
    }
}
