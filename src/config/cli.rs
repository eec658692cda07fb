//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// The settings-relevant subset of the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub module: Option<String>,
    pub config: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub graph_output: Option<PathBuf>,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub no_colors: bool,
    pub no_progress: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            module: args.module.clone(),
            config: args.config.clone(),
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            graph_output: args.graph_output.clone(),
            no_parallel: args.no_parallel,
            threads: args.threads,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// The rules file path, if one was given
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            repo_path: self.args.path.clone(),
            module_path: self.args.module.clone(),
            config_file: self.args.config.clone(),
            output_format: self.args.output_format,
            output_file: self.args.output_file.clone(),
            graph_output: self.args.graph_output.clone(),
            threads: self.args.threads,
            ..Default::default()
        };

        // Flags only override when set
        if self.args.no_parallel {
            settings.parallel = Some(false);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
            settings.show_progress = Some(false);
        }
        if self.args.no_progress {
            settings.show_progress = Some(false);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
