//! Settings and rules validation

use std::path::Path;

use crate::error::{GuardianError, Result};
use crate::models::config::{Config, Settings};
use crate::utils::pattern::invalid_patterns;

/// Validator for run settings and analysis rules
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.repo_path.is_dir() {
            return Err(GuardianError::InvalidPath {
                path: settings.repo_path.clone(),
            });
        }

        if settings.threads == 0 {
            return Err(GuardianError::config_error("Thread count must be at least 1"));
        }

        if let Some(module) = &settings.module_path {
            if module.trim().is_empty() {
                return Err(GuardianError::config_error("Module path must not be empty"));
            }
        }

        Ok(())
    }

    /// Validate the analysis rules read from `source`
    ///
    /// Negative limits are rejected. Malformed patterns are only reported,
    /// since matching treats them as matching nothing.
    pub fn validate_rules(config: &Config, source: &Path) -> Result<()> {
        if config.analysis.max_depth < 0 {
            return Err(GuardianError::config_error(format!(
                "{}: analysis.max_depth must not be negative (got {})",
                source.display(),
                config.analysis.max_depth
            )));
        }

        if config.analysis.min_impact_threshold < 0 {
            return Err(GuardianError::config_error(format!(
                "{}: analysis.min_impact_threshold must not be negative (got {})",
                source.display(),
                config.analysis.min_impact_threshold
            )));
        }

        let patterns: Vec<&String> = config.all_patterns().collect();
        for (pattern, reason) in invalid_patterns(&patterns) {
            tracing::warn!(
                file = %source.display(),
                pattern = %pattern,
                %reason,
                "pattern will never match"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_settings() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings {
            repo_path: temp_dir.path().to_path_buf(),
            threads: 2,
            ..Default::default()
        };
        assert!(SettingsValidator::validate(&settings).is_ok());

        settings.threads = 0;
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(GuardianError::Config { .. })
        ));

        settings.threads = 1;
        settings.module_path = Some("  ".to_string());
        assert!(SettingsValidator::validate(&settings).is_err());

        settings.module_path = None;
        settings.repo_path = temp_dir.path().join("missing");
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(GuardianError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_malformed_patterns_are_not_fatal() {
        let mut config = Config::default();
        config.critical.packages = vec!["[unclosed".to_string()];
        assert!(SettingsValidator::validate_rules(&config, Path::new("x.yml")).is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = Config::default();
        config.analysis.min_impact_threshold = -5;
        let err = SettingsValidator::validate_rules(&config, Path::new("x.yml")).unwrap_err();
        assert!(err.to_string().contains("min_impact_threshold"));
    }
}
