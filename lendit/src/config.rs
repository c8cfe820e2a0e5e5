//! Configuration system for lendit.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`LENDIT_*`)
//! 3. User config file (`~/.lendit/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use lendit::config::{Config, ConfigBuilder};
//!
//! let custom = Config {
//!     default_page_size: Some(25),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 25);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::database::default_data_dir;
use crate::error::{Error, Result};

/// Page size used when a listing request does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Library configuration.
///
/// All fields are optional; absent fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file. Defaults to `~/.lendit`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default page size for booking listings. Defaults to
    /// [`DEFAULT_PAGE_SIZE`].
    #[serde(default)]
    pub default_page_size: Option<i64>,
}

impl Config {
    /// Returns the effective page size.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Merges another configuration on top of this one.
    ///
    /// Fields set in `overlay` win; absent fields keep this config's
    /// values.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            data_dir: overlay.data_dir.or(self.data_dir),
            default_page_size: overlay.default_page_size.or(self.default_page_size),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `default_page_size` is not
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.default_page_size {
            if size <= 0 {
                return Err(Error::Validation {
                    field: "default_page_size".to_string(),
                    message: format!("must be positive, got {size}"),
                });
            }
        }
        Ok(())
    }
}

/// Builds a [`Config`] from files, environment variables, and overrides.
///
/// # Examples
///
/// ```
/// use lendit::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
/// assert_eq!(config.page_size(), 10);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    skip_files: bool,
    skip_env: bool,
    config_path: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with all sources enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips loading the user configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips environment variable overrides.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads the configuration file from an explicit path instead of
    /// `~/.lendit/config.yaml`.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Applies programmatic overrides on top of all other sources.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds and validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or
    /// parsed, an environment variable holds an unparsable value, or
    /// validation fails.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let path = match self.config_path {
                Some(path) => path,
                None => default_data_dir()?.join("config.yaml"),
            };
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                let file_config: Config = serde_yaml::from_str(&contents)?;
                config = config.merge(file_config);
            }
        }

        if !self.skip_env {
            config = config.merge(Self::env_overlay()?);
        }

        if let Some(overrides) = self.overrides {
            config = config.merge(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    fn env_overlay() -> Result<Config> {
        let data_dir = std::env::var("LENDIT_DATA_DIR").ok().map(PathBuf::from);

        let default_page_size = match std::env::var("LENDIT_PAGE_SIZE") {
            Ok(value) => Some(value.parse::<i64>().map_err(|_| Error::Validation {
                field: "LENDIT_PAGE_SIZE".to_string(),
                message: format!("'{value}' is not an integer"),
            })?),
            Err(_) => None,
        };

        Ok(Config {
            data_dir,
            default_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(config.data_dir.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_merge_precedence() {
        let base = Config {
            data_dir: Some(PathBuf::from("/base")),
            default_page_size: Some(5),
        };
        let overlay = Config {
            data_dir: None,
            default_page_size: Some(20),
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.data_dir, Some(PathBuf::from("/base")));
        assert_eq!(merged.page_size(), 20);
    }

    #[test]
    fn test_validate_rejects_nonpositive_page_size() {
        for size in [0, -1] {
            let config = Config {
                default_page_size: Some(size),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, Error::Validation { field, .. } if field == "default_page_size"));
        }
    }

    #[test]
    #[serial]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_builder_loads_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_dir: /srv/lendit\ndefault_page_size: 50\n").unwrap();

        let config = ConfigBuilder::new()
            .with_config_path(&path)
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/lendit")));
        assert_eq!(config.page_size(), 50);
    }

    #[test]
    #[serial]
    fn test_builder_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "page_sise: 50\n").unwrap();

        let err = ConfigBuilder::new()
            .with_config_path(&path)
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    #[serial]
    fn test_builder_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_page_size: 50\n").unwrap();

        std::env::set_var("LENDIT_PAGE_SIZE", "7");
        let config = ConfigBuilder::new()
            .with_config_path(&path)
            .build()
            .unwrap();
        std::env::remove_var("LENDIT_PAGE_SIZE");

        assert_eq!(config.page_size(), 7);
    }

    #[test]
    #[serial]
    fn test_builder_env_invalid_page_size() {
        std::env::set_var("LENDIT_PAGE_SIZE", "lots");
        let err = ConfigBuilder::new().skip_files().build().unwrap_err();
        std::env::remove_var("LENDIT_PAGE_SIZE");

        assert!(matches!(err, Error::Validation { field, .. } if field == "LENDIT_PAGE_SIZE"));
    }

    #[test]
    #[serial]
    fn test_builder_overrides_win() {
        std::env::set_var("LENDIT_PAGE_SIZE", "7");
        let config = ConfigBuilder::new()
            .skip_files()
            .with_config(Config {
                default_page_size: Some(3),
                ..Default::default()
            })
            .build()
            .unwrap();
        std::env::remove_var("LENDIT_PAGE_SIZE");

        assert_eq!(config.page_size(), 3);
    }
}
