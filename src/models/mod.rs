//! Data models for packages, the dependency graph, rules and results

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod package;

pub use analysis::{AffectedPackage, AnalysisResult, AnalysisWarning, PackageImpact};
pub use config::{Config, OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyGraph, GraphStatistics};
pub use package::{NodeId, Package, PackageState};
