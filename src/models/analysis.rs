//! Analysis result structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A high-level package that directly imports a changed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedPackage {
    pub name: String,
    pub is_critical: bool,
}

/// Packages affected by a change in one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageImpact {
    pub changed_package: String,
    /// Sorted by name
    pub affected_packages: Vec<AffectedPackage>,
}

impl PackageImpact {
    pub fn has_critical(&self) -> bool {
        self.affected_packages.iter().any(|pkg| pkg.is_critical)
    }
}

/// A package that could not be resolved while building the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    pub package: String,
    pub message: String,
}

/// Outcome of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One entry per changed package, sorted by changed package
    pub impacts: Vec<PackageImpact>,
    /// Internal dependencies of the changed packages, sorted and deduplicated
    pub direct_dependencies: Vec<String>,
    /// Affected packages that are not direct dependencies, sorted and deduplicated
    pub indirect_dependencies: Vec<String>,
    /// Packages that failed to resolve; they do not change the result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package that failed to resolve
    pub fn add_warning(&mut self, package: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(AnalysisWarning {
            package: package.into(),
            message: message.into(),
        });
    }

    /// Whether no changed packages were found
    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.impacts.len()
    }

    /// Distinct affected package names across all impacts, sorted
    pub fn affected_names(&self) -> BTreeSet<&str> {
        self.impacts
            .iter()
            .flat_map(|impact| impact.affected_packages.iter())
            .map(|pkg| pkg.name.as_str())
            .collect()
    }

    /// Number of distinct affected packages
    pub fn affected_count(&self) -> usize {
        self.affected_names().len()
    }

    /// Distinct critical package names across all impacts, sorted
    pub fn critical_packages(&self) -> BTreeSet<&str> {
        self.impacts
            .iter()
            .flat_map(|impact| impact.affected_packages.iter())
            .filter(|pkg| pkg.is_critical)
            .map(|pkg| pkg.name.as_str())
            .collect()
    }

    pub fn has_critical_impact(&self) -> bool {
        self.impacts.iter().any(PackageImpact::has_critical)
    }
}

/// Renders the PR-comment markdown report
impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::formatters::render_markdown(self))
    }
}
