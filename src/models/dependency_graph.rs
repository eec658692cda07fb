//! Package dependency graph
//!
//! Nodes live in a single arena owned by the graph; edges are [`NodeId`]
//! handles, so import cycles never turn into ownership cycles. A node is
//! registered before its imports are resolved, which is what keeps
//! [`DependencyGraph::resolve`] finite on cyclic imports.

use super::package::{NodeId, Package, PackageState};
use crate::error::{GuardianError, Result};
use crate::parsers::import_scanner::PackageScanner;
use petgraph::algo::tarjan_scc;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// All packages resolved during one analysis run
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<Package>,
    index: HashMap<String, NodeId>,
    module_path: String,
    root_dir: PathBuf,
}

impl DependencyGraph {
    /// Create an empty graph for the module rooted at `root_dir`
    pub fn new(root_dir: impl Into<PathBuf>, module_path: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            module_path: module_path.into(),
            root_dir: root_dir.into(),
        }
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Number of registered packages
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a package by import path
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.index.get(name).map(|id| &self.nodes[id.0])
    }

    /// Look up a package by handle
    pub fn node(&self, id: NodeId) -> &Package {
        &self.nodes[id.0]
    }

    /// Iterate packages in registration order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.nodes.iter()
    }

    /// Import paths of the resolved dependencies of `package`
    pub fn dependency_names<'a>(&'a self, package: &'a Package) -> impl Iterator<Item = &'a str> + 'a {
        package
            .dependencies
            .iter()
            .map(move |id| self.nodes[id.0].name.as_str())
    }

    /// Whether `import_path` lies under the module path
    pub fn is_internal(&self, import_path: &str) -> bool {
        import_path == self.module_path
            || import_path
                .strip_prefix(self.module_path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Directory on disk that holds the package `name`
    pub fn package_dir(&self, name: &str) -> Option<PathBuf> {
        if name == self.module_path {
            return Some(self.root_dir.clone());
        }
        let rel = name
            .strip_prefix(self.module_path.as_str())?
            .strip_prefix('/')?;
        Some(rel.split('/').fold(self.root_dir.clone(), |dir, segment| dir.join(segment)))
    }

    fn register(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let internal = self.is_internal(name);
        self.nodes.push(Package::new(name, internal));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Resolve `package_path` and, recursively, its internal imports
    ///
    /// Resolving a path that already has a node is a no-op. A missing
    /// directory leaves an empty node and is not an error. A scan failure
    /// marks the node failed and is returned to the caller, but never
    /// aborts the resolution of the enclosing package.
    pub fn resolve(&mut self, package_path: &str, scanner: &dyn PackageScanner) -> Result<()> {
        if self.contains(package_path) {
            return Ok(());
        }

        let id = self.register(package_path);

        let Some(dir) = self.package_dir(package_path) else {
            tracing::warn!(package = package_path, "package lies outside the module, skipping");
            self.nodes[id.0].state = PackageState::Missing;
            return Ok(());
        };

        tracing::debug!(package = package_path, path = %dir.display(), "resolving dependencies for package");

        let scanned = match scanner.scan(&dir) {
            Ok(Some(scanned)) => scanned,
            Ok(None) => {
                tracing::warn!(package = package_path, path = %dir.display(), "package directory not found, skipping");
                self.nodes[id.0].state = PackageState::Missing;
                return Ok(());
            }
            Err(err) => {
                self.nodes[id.0].state = PackageState::Failed(err.to_string());
                return Err(err);
            }
        };

        self.nodes[id.0].files = scanned.files;

        let mut seen = HashSet::new();
        for import_path in scanned.imports {
            if !self.is_internal(&import_path) || !seen.insert(import_path.clone()) {
                continue;
            }
            self.nodes[id.0].imports.push(import_path.clone());

            if let Err(err) = self.resolve(&import_path, scanner) {
                tracing::warn!(import = %import_path, error = %err, "failed to resolve import, continuing");
                continue;
            }

            if let Some(&dep) = self.index.get(&import_path) {
                if !self.nodes[dep.0].is_failed() {
                    self.nodes[id.0].dependencies.push(dep);
                }
            }
        }

        let node = &mut self.nodes[id.0];
        node.state = PackageState::Resolved;
        tracing::debug!(
            package = package_path,
            files = node.files.len(),
            imports = node.imports.len(),
            "package processed"
        );

        Ok(())
    }

    /// Packages that directly import `package_path`
    ///
    /// One hop only: packages reaching `package_path` through an
    /// intermediate package are not included.
    pub fn find_dependents(&self, package_path: &str) -> Vec<&Package> {
        let dependents: Vec<&Package> = self
            .nodes
            .iter()
            .filter(|pkg| pkg.name != package_path)
            .filter(|pkg| self.dependency_names(pkg).any(|dep| dep == package_path))
            .collect();

        tracing::debug!(for_package = package_path, count = dependents.len(), "found reverse dependencies");

        dependents
    }

    /// Convert to a petgraph graph; node `i` corresponds to `NodeId(i)`
    pub fn to_petgraph(&self) -> DiGraph<String, &'static str> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), 0);
        for pkg in &self.nodes {
            graph.add_node(pkg.name.clone());
        }
        for (from, pkg) in self.nodes.iter().enumerate() {
            for dep in &pkg.dependencies {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(dep.0), "imports");
            }
        }
        graph
    }

    /// Import cycles, each listed as sorted package names
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.to_petgraph();
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> = scc.into_iter().map(|idx| graph[idx].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            total_packages: self.nodes.len(),
            total_edges: self.nodes.iter().map(|pkg| pkg.dependencies.len()).sum(),
            missing_packages: self
                .nodes
                .iter()
                .filter(|pkg| pkg.state == PackageState::Missing)
                .count(),
            failed_packages: self.nodes.iter().filter(|pkg| pkg.is_failed()).count(),
            cycles: self.cycles().len(),
        }
    }

    /// Export to DOT format for visualization
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        format!("{}", Dot::with_config(&graph, &[DotConfig::EdgeNoLabel]))
    }
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_packages: usize,
    pub total_edges: usize,
    pub missing_packages: usize,
    pub failed_packages: usize,
    pub cycles: usize,
}
