//! Source tree traversal
//!
//! Finds every directory of a checkout that holds Go sources and maps it to
//! the import path it would have under the module.

use crate::error::{GuardianError, Result};
use crate::parsers::import_scanner::is_go_source;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Walker over a Go module checkout
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
}

impl SourceWalker {
    /// Create a walker rooted at the repository directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories below the root that directly contain a `.go` file
    ///
    /// Traversal is sorted by file name and does not follow symbolic links.
    /// The root itself is never returned. Any error while enumerating the
    /// tree aborts the walk.
    pub fn find_package_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| GuardianError::TreeWalk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;

            if entry.depth() == 0 || !entry.file_type().is_dir() {
                continue;
            }

            if has_go_files(entry.path()) {
                dirs.push(entry.into_path());
            }
        }

        tracing::debug!(root = %self.root.display(), count = dirs.len(), "found package directories");
        Ok(dirs)
    }

    /// Import path of `dir` under `module_path`
    ///
    /// Returns `None` for directories outside the root. The root maps to the
    /// module path itself.
    pub fn package_path(&self, module_path: &str, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = rel
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if segments.is_empty() {
            Some(module_path.to_string())
        } else {
            Some(format!("{}/{}", module_path, segments.join("/")))
        }
    }
}

/// Whether `dir` directly contains a file named `*.go`
///
/// Unreadable directories count as having none.
fn has_go_files(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().any(|entry| {
            entry.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && entry.file_name().to_str().is_some_and(is_go_source)
        }),
        Err(err) => {
            tracing::debug!(path = %dir.display(), error = %err, "could not list directory");
            false
        }
    }
}
