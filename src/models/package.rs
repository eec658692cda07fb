//! Package nodes of the dependency graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Handle of a package node inside a [`DependencyGraph`](super::DependencyGraph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Resolution state of a package node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageState {
    /// Registered, imports still being resolved
    Pending,
    /// Scanned and all internal imports processed
    Resolved,
    /// No directory for this package in the checkout
    Missing,
    /// The directory could not be scanned
    Failed(String),
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageState::Pending => write!(f, "pending"),
            PackageState::Resolved => write!(f, "resolved"),
            PackageState::Missing => write!(f, "missing"),
            PackageState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// One Go package, keyed by its full import path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Full import path, e.g. `github.com/org/repo/pkg/foo`
    pub name: String,
    /// Non-test source files, sorted
    pub files: Vec<PathBuf>,
    /// Internal import paths in first-seen order
    pub imports: Vec<String>,
    /// Resolved internal dependencies
    pub dependencies: Vec<NodeId>,
    /// Whether the package lies under the module path
    pub internal: bool,
    pub state: PackageState,
}

impl Package {
    /// Create an empty, pending node
    pub fn new(name: impl Into<String>, internal: bool) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            imports: Vec::new(),
            dependencies: Vec::new(),
            internal,
            state: PackageState::Pending,
        }
    }

    /// Whether the package directory failed to scan
    pub fn is_failed(&self) -> bool {
        matches!(self.state, PackageState::Failed(_))
    }

    /// Whether the import path was already recorded for this package
    pub fn has_import(&self, import_path: &str) -> bool {
        self.imports.iter().any(|imp| imp == import_path)
    }
}
