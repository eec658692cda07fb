//! Impact analysis
//!
//! Builds the package graph of a checkout, maps changed files to packages and
//! reports which high-level packages import them.

use crate::core::parallel::CachedScanner;
use crate::core::walker::SourceWalker;
use crate::error::{try_with_recovery, GuardianError, OptionExt, Result};
use crate::models::analysis::{AffectedPackage, AnalysisResult, PackageImpact};
use crate::models::config::Config;
use crate::models::dependency_graph::DependencyGraph;
use crate::models::package::PackageState;
use crate::parsers::import_scanner::{is_go_source, is_go_test, ImportScanner};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Analyzer for one repository checkout
pub struct ImpactAnalyzer {
    config: Config,
    repo_path: PathBuf,
    graph: Option<DependencyGraph>,
    threads: Option<usize>,
}

impl ImpactAnalyzer {
    /// Create an analyzer; [`set_module_path`](Self::set_module_path) must be
    /// called before analyzing
    pub fn new(config: Config, repo_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            repo_path: repo_path.into(),
            graph: None,
            threads: None,
        }
    }

    /// Pre-scan package directories on `threads` workers before resolving
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    /// Set the module path and start a fresh graph
    pub fn set_module_path(&mut self, module_path: impl Into<String>) {
        self.graph = Some(DependencyGraph::new(&self.repo_path, module_path));
    }

    pub fn module_path(&self) -> Option<&str> {
        self.graph.as_ref().map(DependencyGraph::module_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// The graph built so far, if a module path is set
    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }

    /// Analyze the impact of `changed_files` (paths relative to the repository root)
    pub fn analyze<S: AsRef<str>>(&mut self, changed_files: &[S]) -> Result<AnalysisResult> {
        self.analyze_with_progress(changed_files, |_, _, _| {})
    }

    /// Analyze with progress reporting
    pub fn analyze_with_progress<S, F>(&mut self, changed_files: &[S], progress_fn: F) -> Result<AnalysisResult>
    where
        S: AsRef<str>,
        F: Fn(usize, usize, &str) + Sync,
    {
        let graph = self.graph.as_mut().ok_or_error(|| GuardianError::NotInitialized)?;
        let walker = SourceWalker::new(&self.repo_path);

        progress_fn(0, 0, &format!("Scanning directory: {}", self.repo_path.display()));
        let dirs = walker.find_package_dirs()?;
        let total = dirs.len();
        progress_fn(0, total, &format!("Found {} package directories", total));

        let scanner = CachedScanner::new(ImportScanner::new());
        if let Some(threads) = self.threads {
            scanner.prescan_with_progress(&dirs, threads, |update| {
                progress_fn(update.current, update.total, &update.message)
            })?;
        }

        for (i, dir) in dirs.iter().enumerate() {
            let Some(package_path) = walker.package_path(graph.module_path(), dir) else {
                continue;
            };
            progress_fn(i, total, &format!("Resolving package: {}", package_path));

            if try_with_recovery(|| graph.resolve(&package_path, &scanner))?.is_none() {
                tracing::warn!(package = %package_path, "failed to resolve dependencies");
            }
        }

        let graph = &*graph;
        let changed = changed_packages(graph.module_path(), changed_files);
        let mut result = AnalysisResult::new();
        let mut all_affected = BTreeSet::new();

        for package_name in &changed {
            let mut affected: Vec<AffectedPackage> = graph
                .find_dependents(package_name)
                .into_iter()
                .filter(|dep| !self.config.should_ignore_package(&dep.name))
                .filter(|dep| self.config.is_high_level_package(&dep.name))
                .map(|dep| AffectedPackage {
                    name: dep.name.clone(),
                    is_critical: self.config.is_critical_package(&dep.name),
                })
                .collect();
            affected.sort_by(|a, b| a.name.cmp(&b.name));

            all_affected.extend(affected.iter().map(|pkg| pkg.name.clone()));
            result.impacts.push(PackageImpact {
                changed_package: package_name.clone(),
                affected_packages: affected,
            });
        }

        let direct: BTreeSet<String> = changed
            .iter()
            .filter_map(|name| graph.get(name))
            .flat_map(|pkg| graph.dependency_names(pkg))
            .map(str::to_string)
            .collect();

        result.indirect_dependencies = all_affected.difference(&direct).cloned().collect();
        result.direct_dependencies = direct.into_iter().collect();

        let mut failed: Vec<_> = graph.packages().filter(|pkg| pkg.is_failed()).collect();
        failed.sort_by(|a, b| a.name.cmp(&b.name));
        for pkg in failed {
            if let PackageState::Failed(reason) = &pkg.state {
                result.add_warning(&pkg.name, reason.as_str());
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            let stats = graph.statistics();
            tracing::debug!(
                packages = stats.total_packages,
                edges = stats.total_edges,
                missing = stats.missing_packages,
                failed = stats.failed_packages,
                cycles = stats.cycles,
                changed = result.changed_count(),
                affected = result.affected_count(),
                "analysis complete"
            );
        }
        progress_fn(total, total, "Analysis complete");

        Ok(result)
    }
}

/// Distinct, sorted package paths touched by `changed_files`
///
/// Only non-test `.go` files count. A file at the repository root belongs to
/// the module package itself.
pub fn changed_packages<S: AsRef<str>>(module_path: &str, changed_files: &[S]) -> Vec<String> {
    changed_files
        .iter()
        .filter_map(|file| changed_package(module_path, file.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn changed_package(module_path: &str, file: &str) -> Option<String> {
    let normalized = file.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            part => segments.push(part),
        }
    }

    let file_name = segments.pop()?;
    if !is_go_source(file_name) || is_go_test(file_name) {
        return None;
    }

    if segments.is_empty() {
        Some(module_path.to_string())
    } else {
        Some(format!("{}/{}", module_path, segments.join("/")))
    }
}
