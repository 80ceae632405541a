//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied by the caller through [`Config::with_overrides`])
//!
//! # Config Locations
//!
//! Searched in order, first match wins:
//! 1. `$METADELTA_CONFIG` if set
//! 2. `.metadelta.toml` at the repository root
//!
//! # Example
//!
//! ```no_run
//! use metadelta::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//!
//! println!("API version: {}", config.api_version());
//! println!("Definitions: {}", config.definitions_dir().display());
//! ```

pub mod schema;

pub use schema::{CatalogConfig, FileConfig, FilterConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "METADELTA_CONFIG";

/// Config file name looked up at the repository root.
pub const REPO_CONFIG_FILE: &str = ".metadelta.toml";

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

/// Resolved configuration.
///
/// Accessors apply defaults; the raw file values stay available in `file`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file (or defaults)
    pub file: FileConfig,
    /// Path the config was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    /// A missing config file is not an error (defaults are used).
    pub fn load(repo_path: Option<&Path>) -> Result<Config, ConfigError> {
        let Some(path) = Self::locate(repo_path) else {
            debug!("no config file found, using defaults");
            return Ok(Config::default());
        };

        let file = Self::read_config(&path)?;
        file.validate()?;
        debug!(path = %path.display(), "loaded config");

        Ok(Config {
            file,
            loaded_from: Some(path),
        })
    }

    fn locate(repo_path: Option<&Path>) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        repo_path
            .map(|repo| repo.join(REPO_CONFIG_FILE))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply command-line overrides on top of the file values.
    ///
    /// `None` and empty strings leave the file value untouched.
    pub fn with_overrides(
        mut self,
        api_version: Option<u32>,
        definitions_dir: Option<PathBuf>,
        filter: &FilterConfig,
    ) -> Result<Config, ConfigError> {
        if api_version.is_some() {
            self.file.catalog.api_version = api_version;
        }
        if definitions_dir.is_some() {
            self.file.catalog.definitions_dir = definitions_dir;
        }
        self.file.filter.merge(filter);
        self.file.validate()?;
        Ok(self)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Requested API version.
    ///
    /// Defaults to `0`, which is never supported and therefore selects the
    /// latest supported version.
    pub fn api_version(&self) -> u32 {
        self.file.catalog.api_version.unwrap_or(0)
    }

    /// Directory holding the definition files.
    ///
    /// Defaults to `<data dir>/metadelta/definitions`, or `definitions` in
    /// the working directory when no data dir exists.
    pub fn definitions_dir(&self) -> PathBuf {
        if let Some(dir) = &self.file.catalog.definitions_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("metadelta/definitions"))
            .unwrap_or_else(|| PathBuf::from("definitions"))
    }

    /// Pattern-file settings for the change filters.
    pub fn filter(&self) -> &FilterConfig {
        &self.file.filter
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_repo_config() {
        std::env::remove_var(CONFIG_ENV);
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(REPO_CONFIG_FILE),
            r#"
            [catalog]
            api_version = 57

            [filter]
            ignore = ".forceignore"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(temp.path())).unwrap();

        assert_eq!(config.api_version(), 57);
        assert_eq!(config.filter().ignore, ".forceignore");
        assert_eq!(
            config.loaded_from(),
            Some(temp.path().join(REPO_CONFIG_FILE).as_path())
        );
    }

    #[test]
    fn missing_config_uses_defaults() {
        std::env::remove_var(CONFIG_ENV);
        let temp = TempDir::new().unwrap();

        let config = Config::load(Some(temp.path())).unwrap();

        assert_eq!(config.api_version(), 0);
        assert!(config.loaded_from().is_none());
        assert_eq!(config.filter(), &FilterConfig::default());
    }

    #[test]
    fn malformed_config_is_error() {
        std::env::remove_var(CONFIG_ENV);
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(REPO_CONFIG_FILE), "[catalog\n").unwrap();

        let result = Config::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = Config::default()
            .with_overrides(
                Some(59),
                Some(PathBuf::from("defs")),
                &FilterConfig {
                    include: "inc".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(config.api_version(), 59);
        assert_eq!(config.definitions_dir(), PathBuf::from("defs"));
        assert_eq!(config.filter().include, "inc");
    }
}
