//! Rules file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{GuardianError, Result};
use crate::models::config::{Config, PartialSettings};

/// Default rules file name, looked up in the repository root
pub const DEFAULT_CONFIG_FILE: &str = ".dependency-guardian.yml";

/// Other accepted names, tried in order after the default
pub const DEFAULT_CONFIG_FILE_ALTERNATES: &[&str] =
    &[".dependency-guardian.yaml", ".dependency-guardian.toml"];

/// A rules file on disk
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    /// The default rules file of `repo_path`
    pub fn in_repo<P: AsRef<Path>>(repo_path: P) -> Self {
        Self::with_path(repo_path.as_ref().join(DEFAULT_CONFIG_FILE))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_available(&self) -> bool {
        self.path.is_file()
    }

    /// Parse the rules in this file
    pub fn load(&self) -> Result<Config> {
        if !self.is_available() {
            return Err(GuardianError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    /// Write the default rules template to this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_REPO_PATH`, `_MODULE`, `_CONFIG`, `_OUTPUT_FORMAT`,
/// `_THREADS` and `_NO_PARALLEL`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

const ENV_KEYS: &[&str] = &[
    "REPO_PATH",
    "MODULE",
    "CONFIG",
    "OUTPUT_FORMAT",
    "THREADS",
    "NO_PARALLEL",
];

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            repo_path: self.var("REPO_PATH").map(PathBuf::from),
            module_path: self.var("MODULE"),
            config_file: self.var("CONFIG").map(PathBuf::from),
            ..Default::default()
        };

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            settings.output_format = Some(
                format
                    .parse()
                    .map_err(|_: String| GuardianError::InvalidOutputFormat { format })?,
            );
        }

        if let Some(threads) = self.var("THREADS") {
            let threads = threads.trim().parse().map_err(|_| {
                GuardianError::config_error(format!(
                    "{}_THREADS must be a positive integer (got '{}')",
                    self.prefix, threads
                ))
            })?;
            settings.threads = Some(threads);
        }

        if let Some(value) = self.var("NO_PARALLEL") {
            let disabled = matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes");
            settings.parallel = Some(!disabled);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
