//! Error types and definitions for dependency-guardian
//!
//! Errors carry a severity so callers can decide whether a failure only
//! degrades one package node or must abort the whole analysis run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for dependency-guardian operations
#[derive(Debug, Error)]
pub enum GuardianError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// The analyzer was used before a module path was set
    #[error("analyzer not initialized with a module path")]
    NotInitialized,

    /// A package directory could not be scanned for imports
    #[error("failed to parse package at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The source tree could not be enumerated
    #[error("error walking repository at {path}: {source}")]
    TreeWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("failed to load Go grammar: {message}")]
    Grammar { message: String },

    /// go.mod is missing or has no module directive
    #[error("failed to read module path from {path}: {message}")]
    GoMod { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("config file not found at specified path: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML configuration parse errors
    #[error("failed to parse config file {path}: {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// TOML configuration parse errors
    #[error("failed to parse config file {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Changed-file list could not be read
    #[error("failed to read changed files from {path}: {source}")]
    ChangedFilesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV output was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Worker pool could not be built
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },
}

impl GuardianError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - a single package degrades, the run continues
            GuardianError::Parse { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            GuardianError::NotInitialized => ErrorSeverity::Critical,
            GuardianError::TreeWalk { .. } => ErrorSeverity::Critical,
            GuardianError::Grammar { .. } => ErrorSeverity::Critical,
            GuardianError::GoMod { .. } => ErrorSeverity::Critical,
            GuardianError::Config { .. } => ErrorSeverity::Critical,
            GuardianError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            GuardianError::ConfigRead { .. } => ErrorSeverity::Critical,
            GuardianError::YamlParse { .. } => ErrorSeverity::Critical,
            GuardianError::TomlParse { .. } => ErrorSeverity::Critical,
            GuardianError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            GuardianError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GuardianError::NotInitialized => {
                "The analyzer has no module path. Call set_module_path or pass --module.".to_string()
            }
            GuardianError::TreeWalk { path, source } => {
                format!("Could not walk the source tree at '{}': {}. Check that the checkout is readable.", path.display(), source)
            }
            GuardianError::GoMod { path, message } => {
                format!("Could not determine the module path from '{}': {}. Pass --module to set it explicitly.", path.display(), message)
            }
            GuardianError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid repository directory.", path.display())
            }
            GuardianError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create it with --init or omit --config to use defaults.", path.display())
            }
            GuardianError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        GuardianError::Io { source }
    }

    /// Create a scan failure for one package directory
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GuardianError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        GuardianError::Config {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for GuardianError {
    fn from(err: std::io::Error) -> Self {
        GuardianError::io_error(err)
    }
}

impl From<csv::Error> for GuardianError {
    fn from(err: csv::Error) -> Self {
        GuardianError::Csv { source: err }
    }
}

impl From<serde_json::Error> for GuardianError {
    fn from(err: serde_json::Error) -> Self {
        GuardianError::JsonSerialize { source: err }
    }
}

/// Result type alias for dependency-guardian operations
pub type Result<T> = std::result::Result<T, GuardianError>;
