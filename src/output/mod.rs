//! Output formatting and writing functionality

pub mod formatters;
mod progress;
mod writers;

pub use self::formatters::{render_markdown, REPORT_MARKER};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Format analysis results into a string
    fn format(&self, result: &AnalysisResult) -> Result<String>;
}

/// PR-comment markdown, the default output
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        Ok(render_markdown(result))
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_results_quiet(result));
        }
        Ok(formatters::format_results_text(result, self.use_colors, self.verbose))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        formatters::format_results_json(result, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        formatters::format_results_csv(result)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
