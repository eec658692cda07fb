//! Configuration management
//!
//! Run settings are merged from environment variables and the command line
//! (command line wins). Analysis rules come from the rules file, see
//! [`parser::load_rules`].

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, DEFAULT_CONFIG_FILE};
pub use parser::{
    create_default_config, find_default_config, load_rules, parse_config_content, parse_config_file,
};
pub use settings::SettingsValidator;

/// Environment variable prefix for run settings
pub const ENV_PREFIX: &str = "DEPGUARD";

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources
#[derive(Default)]
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge settings; fields set in `partial` win
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }
        tracing::debug!(source = source.name(), "loading settings");
        Ok(self.merge(source.load()?))
    }

    /// Like [`load_from`](Self::load_from), but a failing source is skipped
    pub fn try_load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Self {
        if !source.is_available() {
            return self;
        }
        match source.load() {
            Ok(partial) => self.merge(partial),
            Err(err) => {
                tracing::warn!(source = source.name(), error = %err, "ignoring configuration source");
                self
            }
        }
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

/// Load run settings from the environment and the command line
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, ENV_PREFIX)
}

/// Load run settings with a custom environment variable prefix
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let mut sources: Vec<Box<dyn ConfigSource>> = vec![
        Box::new(EnvConfig::new(env_prefix)),
        Box::new(CliConfig::new(cli_args)),
    ];
    sources.sort_by_key(|source| source.priority());

    let mut builder = ConfigBuilder::new();
    for source in &sources {
        builder = builder.load_from(&**source)?;
    }

    builder.build()
}
