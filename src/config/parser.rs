//! Configuration file parsing utilities
//!
//! Rules files are YAML by default; a `.toml` extension selects TOML with
//! the same schema.

use std::fs;
use std::path::{Path, PathBuf};

use super::file::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_FILE_ALTERNATES};
use super::settings::SettingsValidator;
use crate::error::{GuardianError, Result};
use crate::models::config::Config;

/// Embedded template written by `--init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.yml");

/// Parse a rules file
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GuardianError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| GuardianError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse rules content; the format follows the extension of `path`
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<Config> {
    let path = path.as_ref();

    let config: Config = if is_toml(path) {
        toml::from_str(content).map_err(|e| GuardianError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })?
    } else if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| GuardianError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    SettingsValidator::validate_rules(&config, path)?;

    Ok(config)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Locate the rules file for `repo_path`
///
/// Looks for `.dependency-guardian.yml` (then `.yaml`, `.toml`) in the
/// repository, then `dependency-guardian/config.yml` in the user config
/// directory.
pub fn find_default_config(repo_path: &Path) -> Option<PathBuf> {
    find_repo_config(repo_path).or_else(|| user_config_path().filter(|path| path.is_file()))
}

/// The rules file inside the repository, if any
pub fn find_repo_config(repo_path: &Path) -> Option<PathBuf> {
    std::iter::once(DEFAULT_CONFIG_FILE)
        .chain(DEFAULT_CONFIG_FILE_ALTERNATES.iter().copied())
        .map(|name| repo_path.join(name))
        .find(|candidate| candidate.is_file())
}

/// Per-user fallback location for the rules file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dependency-guardian").join("config.yml"))
}

/// Load the analysis rules for a run
///
/// An explicit path must exist. Without one, the repository is searched,
/// then the user config directory, and the built-in defaults are used when
/// nothing is found.
pub fn load_rules(repo_path: &Path, explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading configuration");
        return parse_config_file(path);
    }

    if let Some(path) = find_repo_config(repo_path) {
        tracing::debug!(path = %path.display(), "loading configuration");
        return parse_config_file(path);
    }

    match user_config_path().filter(|path| path.is_file()) {
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                "no rules file in the repository, using the user-level configuration"
            );
            parse_config_file(path)
        }
        None => {
            tracing::info!(
                path = %repo_path.join(DEFAULT_CONFIG_FILE).display(),
                "no default config file found, using default configuration"
            );
            Ok(Config::default())
        }
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(GuardianError::io_error)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(GuardianError::io_error)?;

    Ok(())
}
