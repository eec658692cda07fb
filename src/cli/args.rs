//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::config::OutputFormat as ReportFormat;

/// dependency-guardian - impact analysis for changes in a Go module
#[derive(Parser, Debug, Clone)]
#[command(name = "dependency-guardian")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Report which packages of a Go module are affected by a set of changed files")]
#[command(long_about = "dependency-guardian builds the internal import graph of a Go module and reports, \
for every package touched by a change, the high-level packages that import it directly. \
Critical packages are flagged so reviewers can see risky changes at a glance. \
The default output is a markdown report suitable for a pull request comment.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze two changed files in the current module
    dependency-guardian pkg/db/conn.go internal/auth/token.go

    # Analyze a module checked out elsewhere
    dependency-guardian --path ../service pkg/db/conn.go

    # Read the changed files from git
    git diff --name-only origin/main | dependency-guardian --changed-files -

Output Options:
    # Human-readable text
    dependency-guardian --output text pkg/db/conn.go

    # JSON for other tools
    dependency-guardian --output json --output-file impact.json pkg/db/conn.go

    # Export the package graph for Graphviz
    dependency-guardian --graph-output deps.dot pkg/db/conn.go

Configuration:
    # Use a specific rules file
    dependency-guardian --config ./ci/guardian.yml pkg/db/conn.go

    # Create .dependency-guardian.yml in the repository
    dependency-guardian --init

Logging:
    # Debug logs on stderr
    dependency-guardian --log-level debug pkg/db/conn.go

    # Structured logs for CI
    dependency-guardian --log-format json pkg/db/conn.go
")]
pub struct Args {
    /// Changed files, relative to the repository root
    #[arg(value_name = "FILE", help = "Changed files relative to the repository root (e.g. pkg/db/conn.go)")]
    pub files: Vec<String>,

    /// Repository root
    #[arg(short, long, value_name = "PATH", help = "Root of the Go module checkout (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Module path override
    #[arg(short, long, value_name = "MODULE", help = "Module path of the repository (read from go.mod if not specified)")]
    pub module: Option<String>,

    /// File listing changed files
    #[arg(long, value_name = "FILE", help = "Read changed files from FILE, one per line ('-' reads stdin)")]
    pub changed_files: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, help = "Output format: 'markdown' for PR comments (default), 'text', 'json' or 'csv'")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Rules file path
    #[arg(short, long, value_name = "FILE", help = "Path to the rules file (defaults to .dependency-guardian.yml in the repository)")]
    pub config: Option<PathBuf>,

    /// Disable the parallel pre-scan
    #[arg(long, help = "Scan package directories on a single thread")]
    pub no_parallel: bool,

    /// Worker threads for the pre-scan
    #[arg(long, value_name = "N", help = "Number of worker threads for scanning (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Disable colored output
    #[arg(long, help = "Disable colored text output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Only print a one-line summary in text mode and hide progress")]
    pub quiet: bool,

    /// Show detailed progress
    #[arg(short, long, help = "Show detailed progress and list direct and indirect dependencies in text mode")]
    pub verbose: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", default_value = "warn", help = "Log level for stderr diagnostics (overridden by RUST_LOG)")]
    pub log_level: String,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, help = "Log format for stderr diagnostics")]
    pub log_format: LogFormat,

    /// Export the package graph in DOT format
    #[arg(long, value_name = "FILE", help = "Write the internal package graph in DOT format to FILE")]
    pub graph_output: Option<PathBuf>,

    /// Initialize a default rules file
    #[arg(long, help = "Create a default .dependency-guardian.yml in the repository")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report for pull request comments
    Markdown,
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => ReportFormat::Markdown,
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Csv => ReportFormat::Csv,
        }
    }
}

/// Log output format
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
