//! Command implementations

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use super::Args;
use crate::config::{load_config, load_rules, CliArgs, FileConfig};
use crate::core::ImpactAnalyzer;
use crate::error::{GuardianError, Result};
use crate::models::analysis::AnalysisResult;
use crate::models::config::Settings;
use crate::output::{create_formatter, create_progress_callback, create_writer, FileWriter, OutputWriter, ProgressReporter};
use crate::parsers::read_module_path;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the impact of changed files
    Analyze(Args),
    /// Write a default rules file into the repository
    Init(Args),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            Command::Init(args)
        } else {
            Command::Analyze(args)
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                let settings = load_config(CliArgs::from(args))?;
                let changed_files = collect_changed_files(&args.files, args.changed_files.as_deref())?;
                let result = run_analysis(&settings, &changed_files)?;
                write_report(&settings, &result)
            }
            Command::Init(args) => {
                let repo = args.path.clone().unwrap_or_else(|| ".".into());
                let file = FileConfig::in_repo(&repo);

                if file.is_available() {
                    println!("Configuration file already exists: {}", file.path().display());
                    return Ok(());
                }

                file.create_default()?;
                println!("Created default configuration file: {}", file.path().display());
                Ok(())
            }
        }
    }
}

/// Build the graph and analyze `changed_files` with the given settings
pub fn run_analysis(settings: &Settings, changed_files: &[String]) -> Result<AnalysisResult> {
    let rules = load_rules(&settings.repo_path, settings.config_file.as_deref())?;

    let module_path = match &settings.module_path {
        Some(module) => module.clone(),
        None => read_module_path(&settings.repo_path)?,
    };
    tracing::debug!(module = %module_path, repo = %settings.repo_path.display(), "starting analysis");

    let mut analyzer = ImpactAnalyzer::new(rules, &settings.repo_path);
    if settings.parallel {
        analyzer = analyzer.with_parallelism(settings.threads);
    }
    analyzer.set_module_path(module_path);

    let reporter = Arc::new(ProgressReporter::new(
        settings.quiet || !settings.show_progress,
        settings.verbose,
    ));
    reporter.start(0, &format!("Analyzing {}", settings.repo_path.display()));
    let outcome = analyzer.analyze_with_progress(changed_files, create_progress_callback(Arc::clone(&reporter)));
    reporter.finish("Analysis complete");
    let result = outcome?;

    if let (Some(path), Some(graph)) = (&settings.graph_output, analyzer.graph()) {
        FileWriter::new(path).write(&graph.to_dot())?;
        tracing::info!(path = %path.display(), packages = graph.len(), "wrote dependency graph");
    }

    Ok(result)
}

fn write_report(settings: &Settings, result: &AnalysisResult) -> Result<()> {
    // no escape codes in files
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors, settings.verbose, settings.quiet);
    let output = formatter.format(result)?;

    create_writer(settings.output_file.as_ref()).write(&output)
}

/// Combine positional files with the contents of `--changed-files`
///
/// `-` reads the list from stdin.
pub fn collect_changed_files(files: &[String], list: Option<&Path>) -> Result<Vec<String>> {
    let mut changed = files.to_vec();

    if let Some(path) = list {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| GuardianError::ChangedFilesRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(|e| GuardianError::ChangedFilesRead {
                path: path.to_path_buf(),
                source: e,
            })?
        };
        changed.extend(parse_changed_files(&content));
    }

    Ok(changed)
}

/// One path per line; blank lines and `#` comments are skipped
pub fn parse_changed_files(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
