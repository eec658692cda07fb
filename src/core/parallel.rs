//! Parallel pre-scan of package directories
//!
//! Scanning is the only expensive part of resolution and is independent per
//! directory, so it can run on a rayon pool ahead of time. Graph resolution
//! itself stays single-threaded and consumes the results through the
//! [`PackageScanner`] seam.

use crate::error::{GuardianError, Result};
use crate::parsers::import_scanner::{PackageScanner, ScannedPackage};
use dashmap::DashMap;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Default worker count: one per logical CPU
pub fn default_threads() -> usize {
    num_cpus::get().max(1)
}

/// Scanner that serves pre-computed scan results and falls back to a live scan
///
/// Each cached entry is handed out once; the graph scans every directory at
/// most once, so a second request for the same directory goes to the inner
/// scanner.
pub struct CachedScanner<S> {
    inner: S,
    cache: DashMap<PathBuf, Result<Option<ScannedPackage>>>,
}

impl<S: PackageScanner + Sync> CachedScanner<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Number of entries still waiting to be consumed
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Scan `dirs` concurrently on a pool of `threads` workers
    pub fn prescan(&self, dirs: &[PathBuf], threads: usize) -> Result<()> {
        self.prescan_with_progress(dirs, threads, |_| {})
    }

    /// Scan `dirs` concurrently, reporting each finished directory
    pub fn prescan_with_progress<P>(&self, dirs: &[PathBuf], threads: usize, progress_callback: P) -> Result<()>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .map_err(|e| GuardianError::ParallelExecution {
                message: format!("failed to build thread pool: {}", e),
            })?;

        let total = dirs.len();
        let counter = AtomicUsize::new(0);

        tracing::debug!(directories = total, threads, "pre-scanning package directories");

        pool.install(|| {
            dirs.par_iter().for_each(|dir| {
                let outcome = self.inner.scan(dir);
                self.cache.insert(dir.clone(), outcome);

                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                progress_callback(ProgressUpdate::new(
                    done,
                    total,
                    format!("Scanned {}", dir.display()),
                ));
            });
        });

        Ok(())
    }
}

impl<S: PackageScanner> PackageScanner for CachedScanner<S> {
    fn scan(&self, dir: &Path) -> Result<Option<ScannedPackage>> {
        match self.cache.remove(dir) {
            Some((_, outcome)) => outcome,
            None => self.inner.scan(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scanner returning canned imports and counting calls per directory
    struct CountingScanner {
        calls: Mutex<HashMap<PathBuf, usize>>,
    }

    impl CountingScanner {
        fn new() -> Self {
            Self {
                calls: Mutex::new(HashMap::new()),
            }
        }

        fn calls(&self, dir: &str) -> usize {
            self.calls.lock().unwrap().get(Path::new(dir)).copied().unwrap_or(0)
        }
    }

    impl PackageScanner for CountingScanner {
        fn scan(&self, dir: &Path) -> Result<Option<ScannedPackage>> {
            *self.calls.lock().unwrap().entry(dir.to_path_buf()).or_insert(0) += 1;
            if dir.ends_with("broken") {
                return Err(GuardianError::parse_error(dir, "no Go source files found"));
            }
            Ok(Some(ScannedPackage {
                files: vec![dir.join("x.go")],
                imports: vec![format!("import/of/{}", dir.display())],
            }))
        }
    }

    #[test]
    fn test_prescan_serves_cached_results_once() {
        let cached = CachedScanner::new(CountingScanner::new());
        let dirs: Vec<PathBuf> = ["/r/a", "/r/b", "/r/c"].iter().map(PathBuf::from).collect();
        cached.prescan(&dirs, 2).unwrap();
        assert_eq!(cached.cached(), 3);

        let a = cached.scan(Path::new("/r/a")).unwrap().unwrap();
        assert_eq!(a.imports, vec!["import/of//r/a"]);
        assert_eq!(cached.inner.calls("/r/a"), 1);
        assert_eq!(cached.cached(), 2);

        // second request misses the cache and scans live
        cached.scan(Path::new("/r/a")).unwrap();
        assert_eq!(cached.inner.calls("/r/a"), 2);
    }

    #[test]
    fn test_cache_miss_scans_live() {
        let cached = CachedScanner::new(CountingScanner::new());
        assert!(cached.scan(Path::new("/r/z")).unwrap().is_some());
        assert_eq!(cached.inner.calls("/r/z"), 1);
    }

    #[test]
    fn test_prescan_keeps_errors() {
        let cached = CachedScanner::new(CountingScanner::new());
        cached.prescan(&[PathBuf::from("/r/broken")], 1).unwrap();
        let err = cached.scan(Path::new("/r/broken")).unwrap_err();
        assert!(matches!(err, GuardianError::Parse { .. }));
        assert_eq!(cached.inner.calls("/r/broken"), 1);
    }

    #[test]
    fn test_prescan_reports_progress() {
        let cached = CachedScanner::new(CountingScanner::new());
        let dirs: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("/r/p{}", i))).collect();
        let seen = Mutex::new(Vec::new());
        cached
            .prescan_with_progress(&dirs, 3, |update| seen.lock().unwrap().push(update.current))
            .unwrap();
        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(ProgressUpdate::new(1, 4, "x").percentage(), 25.0);
        assert_eq!(ProgressUpdate::new(0, 0, "x").percentage(), 0.0);
        assert!(default_threads() >= 1);
    }
}
