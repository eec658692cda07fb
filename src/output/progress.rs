//! Progress reporting functionality
//!
//! Progress bars draw to stderr so they never mix with a report written to
//! stdout.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};

/// Progress reporter for the analysis phases
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
    current_operation: Mutex<String>,
}

impl ProgressReporter {
    /// Create a new progress reporter; no bar is drawn in quiet mode
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let bar = if quiet {
            None
        } else {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            bar,
            current_operation: Mutex::new(String::new()),
        }
    }

    /// A reporter that draws nothing
    pub fn hidden() -> Self {
        Self::new(true, false)
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Ok(mut current) = self.current_operation.lock() {
            *current = operation.to_string();
        }

        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_message(operation.to_string());
        }

        if self.verbose {
            tracing::info!(operation, "starting");
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }

        if self.verbose {
            tracing::info!(current, total, "{}", message);
        }
    }

    /// Finish the progress operation and clear the bar
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }

        if self.verbose {
            tracing::info!("{}", message);
        }
    }

    /// Name of the operation passed to the last `start`
    pub fn current_operation(&self) -> String {
        self.current_operation
            .lock()
            .map(|op| op.clone())
            .unwrap_or_default()
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Create a callback for [`ImpactAnalyzer::analyze_with_progress`](crate::core::ImpactAnalyzer::analyze_with_progress)
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(usize, usize, &str) + Send + Sync {
    move |current: usize, total: usize, message: &str| {
        reporter.update(current, total, message);
    }
}
