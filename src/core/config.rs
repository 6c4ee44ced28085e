//! core::config
//!
//! Branch configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults (`main`, `develop`, the conventional GitFlow prefixes)
//! 2. Repo config file (`gitflow.toml` at the repository root, if present)
//! 3. CLI flags
//!
//! # Validation
//!
//! The merged [`BranchConfig`] is validated once, at construction. A missing
//! or duplicated prefix is a configuration error, not a policy violation:
//! it aborts the run instead of failing the verdict.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gitflow.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Repository configuration file contents.
///
/// All fields are optional; anything absent falls back to the built-in
/// defaults unless a CLI flag overrides it.
///
/// # Example
///
/// ```toml
/// trunk = "main"
/// develop = "develop"
/// tag_prefix = "v"
///
/// [prefixes]
/// feature = "feature/"
/// bugfix = "bugfix/"
/// release = "release/"
/// hotfix = "hotfix/"
/// support = "support/"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Trunk (production) branch name
    pub trunk: Option<String>,

    /// Integration (pre-release) branch name
    pub develop: Option<String>,

    /// Release tag prefix
    pub tag_prefix: Option<String>,

    /// Host API base URL (for GitHub Enterprise)
    pub api_base: Option<String>,

    /// Branch type prefixes
    pub prefixes: Option<PrefixConfig>,
}

/// Branch type prefix overrides.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PrefixConfig {
    pub feature: Option<String>,
    pub bugfix: Option<String>,
    pub release: Option<String>,
    pub hotfix: Option<String>,
    pub support: Option<String>,
}

impl FileConfig {
    /// Load a config file from the given path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read and
    /// `ConfigError::ParseError` if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the config file if it exists; a missing file is not an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// CLI-level overrides, applied on top of the file config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub trunk: Option<String>,
    pub develop: Option<String>,
    pub feature_prefix: Option<String>,
    pub bugfix_prefix: Option<String>,
    pub release_prefix: Option<String>,
    pub hotfix_prefix: Option<String>,
    pub support_prefix: Option<String>,
    pub tag_prefix: Option<String>,
    pub release_version: Option<String>,
}

/// Immutable branch configuration, built once per run.
///
/// Nothing mutates this after construction; it is passed by reference into
/// the pure validation components and the post-release sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchConfig {
    /// Trunk (production) branch name, e.g. "main"
    pub trunk: String,
    /// Integration (pre-release) branch name, e.g. "develop"
    pub develop: String,
    /// Feature branch prefix, e.g. "feature/"
    pub feature_prefix: String,
    /// Bugfix branch prefix, e.g. "bugfix/"
    pub bugfix_prefix: String,
    /// Release branch prefix, e.g. "release/"
    pub release_prefix: String,
    /// Hotfix branch prefix, e.g. "hotfix/"
    pub hotfix_prefix: String,
    /// Support branch prefix, e.g. "support/"
    pub support_prefix: String,
    /// Release tag prefix, e.g. "v"
    pub tag_prefix: String,
    /// Declared release version for this run, if any
    pub release_version: Option<String>,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            trunk: "main".to_string(),
            develop: "develop".to_string(),
            feature_prefix: "feature/".to_string(),
            bugfix_prefix: "bugfix/".to_string(),
            release_prefix: "release/".to_string(),
            hotfix_prefix: "hotfix/".to_string(),
            support_prefix: "support/".to_string(),
            tag_prefix: "v".to_string(),
            release_version: None,
        }
    }
}

impl BranchConfig {
    /// Build the merged configuration: defaults, then file, then overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the merged result fails
    /// [`validate`](Self::validate).
    pub fn resolve(
        file: Option<&FileConfig>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let prefixes = file.and_then(|f| f.prefixes.clone()).unwrap_or_default();

        let pick = |cli: &Option<String>, file: Option<String>, default: String| {
            cli.clone().or(file).unwrap_or(default)
        };

        let config = Self {
            trunk: pick(
                &overrides.trunk,
                file.and_then(|f| f.trunk.clone()),
                defaults.trunk,
            ),
            develop: pick(
                &overrides.develop,
                file.and_then(|f| f.develop.clone()),
                defaults.develop,
            ),
            feature_prefix: pick(
                &overrides.feature_prefix,
                prefixes.feature.clone(),
                defaults.feature_prefix,
            ),
            bugfix_prefix: pick(
                &overrides.bugfix_prefix,
                prefixes.bugfix.clone(),
                defaults.bugfix_prefix,
            ),
            release_prefix: pick(
                &overrides.release_prefix,
                prefixes.release.clone(),
                defaults.release_prefix,
            ),
            hotfix_prefix: pick(
                &overrides.hotfix_prefix,
                prefixes.hotfix.clone(),
                defaults.hotfix_prefix,
            ),
            support_prefix: pick(
                &overrides.support_prefix,
                prefixes.support.clone(),
                defaults.support_prefix,
            ),
            tag_prefix: pick(
                &overrides.tag_prefix,
                file.and_then(|f| f.tag_prefix.clone()),
                defaults.tag_prefix,
            ),
            release_version: overrides
                .release_version
                .clone()
                .filter(|v| !v.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the trunk or integration
    /// branch name is empty, when any branch prefix is empty, or when two
    /// branch prefixes collide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trunk.is_empty() {
            return Err(ConfigError::InvalidValue(
                "trunk branch name cannot be empty".to_string(),
            ));
        }
        if self.develop.is_empty() {
            return Err(ConfigError::InvalidValue(
                "integration branch name cannot be empty".to_string(),
            ));
        }

        let prefixes = [
            ("feature", &self.feature_prefix),
            ("bugfix", &self.bugfix_prefix),
            ("release", &self.release_prefix),
            ("hotfix", &self.hotfix_prefix),
            ("support", &self.support_prefix),
        ];

        for (kind, prefix) in &prefixes {
            if prefix.is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "{} branch prefix cannot be empty",
                    kind
                )));
            }
        }

        let mut seen = HashSet::new();
        for (kind, prefix) in &prefixes {
            if !seen.insert(prefix.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "duplicate branch prefix '{}' (reused for {})",
                    prefix, kind
                )));
            }
        }

        Ok(())
    }

    /// The release tag name for this run's declared version, if any.
    pub fn release_tag(&self) -> Option<String> {
        self.release_version
            .as_ref()
            .map(|v| format!("{}{}", self.tag_prefix, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BranchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trunk, "main");
        assert_eq!(config.develop, "develop");
    }

    #[test]
    fn resolve_applies_precedence() {
        let file = FileConfig {
            trunk: Some("master".to_string()),
            tag_prefix: Some("rel-".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            trunk: Some("production".to_string()),
            ..Default::default()
        };

        let config = BranchConfig::resolve(Some(&file), &overrides).unwrap();

        // CLI flag beats file
        assert_eq!(config.trunk, "production");
        // File beats default
        assert_eq!(config.tag_prefix, "rel-");
        // Default survives when nothing overrides it
        assert_eq!(config.develop, "develop");
    }

    #[test]
    fn empty_release_version_is_treated_as_absent() {
        let overrides = ConfigOverrides {
            release_version: Some(String::new()),
            ..Default::default()
        };
        let config = BranchConfig::resolve(None, &overrides).unwrap();
        assert!(config.release_version.is_none());
        assert!(config.release_tag().is_none());
    }

    #[test]
    fn release_tag_joins_prefix_and_version() {
        let config = BranchConfig {
            release_version: Some("2.0.0".to_string()),
            ..Default::default()
        };
        assert_eq!(config.release_tag().unwrap(), "v2.0.0");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let config = BranchConfig {
            hotfix_prefix: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hotfix"));
    }

    #[test]
    fn duplicate_prefix_is_rejected() {
        let config = BranchConfig {
            bugfix_prefix: "feature/".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn empty_trunk_is_rejected() {
        let config = BranchConfig {
            trunk: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
