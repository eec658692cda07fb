//! Configuration-related data structures
//!
//! Two kinds of configuration live here: [`Config`], the analysis rules read
//! from `.dependency-guardian.yml`, and [`Settings`], the run options merged
//! from the command line and environment.

use crate::utils::pattern::matches_any;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Analysis rules
///
/// Every section and key is optional in the file; missing ones keep the
/// values of [`Config::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub targets: TargetConfig,
    pub patterns: PatternConfig,
    pub analysis: AnalysisConfig,
    pub critical: CriticalConfig,
}

/// Which packages count as high-level targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub high_level_packages: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            high_level_packages: vec!["**".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub ignore_patterns: Vec<String>,
    /// Accepted for compatibility; not consulted by the analysis
    pub include_patterns: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec!["*_test.go".to_string()],
            include_patterns: Vec::new(),
        }
    }
}

/// Traversal limits
///
/// Both values are validated but not enforced: reverse dependencies are
/// always reported one hop deep and every impact is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub max_depth: i64,
    pub min_impact_threshold: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_impact_threshold: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalConfig {
    pub packages: Vec<String>,
}

impl Config {
    /// Whether `package_path` is a high-level target; an empty target list
    /// makes every package a target
    pub fn is_high_level_package(&self, package_path: &str) -> bool {
        self.targets.high_level_packages.is_empty()
            || matches_any(&self.targets.high_level_packages, package_path)
    }

    pub fn is_critical_package(&self, package_path: &str) -> bool {
        matches_any(&self.critical.packages, package_path)
    }

    pub fn should_ignore_package(&self, package_path: &str) -> bool {
        matches_any(&self.patterns.ignore_patterns, package_path)
    }

    /// All patterns in the rules, for validation
    pub fn all_patterns(&self) -> impl Iterator<Item = &String> {
        self.targets
            .high_level_packages
            .iter()
            .chain(&self.patterns.ignore_patterns)
            .chain(&self.patterns.include_patterns)
            .chain(&self.critical.packages)
    }
}

/// Run settings for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the Go module checkout
    pub repo_path: PathBuf,

    /// Module path override; read from go.mod when absent
    pub module_path: Option<String>,

    /// Explicit rules file
    pub config_file: Option<PathBuf>,

    /// Output format (markdown, text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Where to write the package graph in DOT format
    pub graph_output: Option<PathBuf>,

    /// Whether to pre-scan package directories in parallel
    pub parallel: bool,

    /// Worker count for the parallel pre-scan
    pub threads: usize,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            module_path: None,
            config_file: None,
            output_format: OutputFormat::Markdown,
            output_file: None,
            graph_output: None,
            parallel: true,
            threads: crate::core::parallel::default_threads(),
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PR-comment markdown with the hidden marker
    Markdown,
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub repo_path: Option<PathBuf>,
    pub module_path: Option<String>,
    pub config_file: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub graph_output: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.repo_path.is_some() {
            self.repo_path = other.repo_path;
        }
        if other.module_path.is_some() {
            self.module_path = other.module_path;
        }
        if other.config_file.is_some() {
            self.config_file = other.config_file;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.graph_output.is_some() {
            self.graph_output = other.graph_output;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(repo_path) = &self.repo_path {
            settings.repo_path = repo_path.clone();
        }
        if self.module_path.is_some() {
            settings.module_path = self.module_path.clone();
        }
        if self.config_file.is_some() {
            settings.config_file = self.config_file.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if self.output_file.is_some() {
            settings.output_file = self.output_file.clone();
        }
        if self.graph_output.is_some() {
            settings.graph_output = self.graph_output.clone();
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let config = Config::default();
        assert_eq!(config.targets.high_level_packages, vec!["**"]);
        assert_eq!(config.patterns.ignore_patterns, vec!["*_test.go"]);
        assert!(config.patterns.include_patterns.is_empty());
        assert_eq!(config.analysis.max_depth, 10);
        assert_eq!(config.analysis.min_impact_threshold, 0);
        assert!(config.critical.packages.is_empty());
    }

    #[test]
    fn test_predicates() {
        let mut config = Config::default();
        config.targets.high_level_packages = vec!["github.com/a/b/cmd/*".to_string()];
        config.critical.packages = vec!["**/api".to_string()];
        config.patterns.ignore_patterns = vec!["**/mocks".to_string()];

        assert!(config.is_high_level_package("github.com/a/b/cmd/server"));
        assert!(!config.is_high_level_package("github.com/a/b/internal/db"));
        assert!(config.is_critical_package("github.com/a/b/api"));
        assert!(!config.is_critical_package("github.com/a/b/apis"));
        assert!(config.should_ignore_package("github.com/a/b/x/mocks"));
    }

    #[test]
    fn test_empty_targets_match_everything() {
        let mut config = Config::default();
        config.targets.high_level_packages.clear();
        assert!(config.is_high_level_package("anything/at/all"));
    }

    #[test]
    fn test_partial_settings_merge() {
        let mut base = PartialSettings {
            output_format: Some(OutputFormat::Json),
            threads: Some(2),
            ..Default::default()
        };
        base.merge_from(PartialSettings {
            threads: Some(8),
            quiet: Some(true),
            ..Default::default()
        });

        let settings = base.to_settings();
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.threads, 8);
        assert!(settings.quiet);
        assert!(settings.parallel);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
