//! dependency-guardian - impact analysis for Go modules
//!
//! This library builds the internal import graph of a Go module checkout and
//! reports which high-level packages directly import the packages touched
//! by a set of changed files.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::ImpactAnalyzer;
pub use error::{handle_error, try_with_recovery, ErrorSeverity, GuardianError, OptionExt, Result, ResultExt};
pub use models::{
    analysis::{AffectedPackage, AnalysisResult, PackageImpact},
    config::{Config, Settings},
    dependency_graph::DependencyGraph,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
