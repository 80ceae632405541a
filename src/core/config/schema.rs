//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [catalog]
//! api_version = 58
//! definitions_dir = "/opt/metadelta/definitions"
//!
//! [filter]
//! ignore = ".forceignore"
//! ignore_destructive = ""
//! include = ""
//! include_destructive = ""
//! ```
//!
//! # Validation
//!
//! Config values are validated after parsing. Filter paths are either empty
//! (no pattern file) or a path; a value made only of whitespace is rejected.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::filter::FilterSources;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Definition catalog settings
    pub catalog: CatalogConfig,

    /// Pattern files for the change filters
    pub filter: FilterConfig,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.filter.validate()
    }
}

/// Definition catalog settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Requested API version. Unsupported versions fall back to the latest
    /// supported one.
    pub api_version: Option<u32>,

    /// Directory holding the `<prefix><version>.json` definition files
    pub definitions_dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Validate the catalog settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.definitions_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "definitions_dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Pattern-file locations for the ignore and include filters.
///
/// Each field is either empty (no patterns) or a path to a file with one
/// gitignore-style rule per line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Patterns excluded from every change
    pub ignore: String,

    /// Patterns excluded from deletions; defaults to `ignore`
    pub ignore_destructive: String,

    /// Patterns a change must match to be kept
    pub include: String,

    /// Patterns a deletion must match to be kept
    pub include_destructive: String,
}

impl FilterConfig {
    /// Validate the filter settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("ignore", &self.ignore),
            ("ignore_destructive", &self.ignore_destructive),
            ("include", &self.include),
            ("include_destructive", &self.include_destructive),
        ] {
            if !value.is_empty() && value.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be empty or a path",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Sources for the ignore filter.
    pub fn ignore_sources(&self) -> FilterSources {
        FilterSources::new(non_empty(&self.ignore), non_empty(&self.ignore_destructive))
    }

    /// Sources for the include filter.
    pub fn include_sources(&self) -> FilterSources {
        FilterSources::new(
            non_empty(&self.include),
            non_empty(&self.include_destructive),
        )
    }

    /// Overlay non-empty values from `other` onto this config.
    pub fn merge(&mut self, other: &FilterConfig) {
        for (target, value) in [
            (&mut self.ignore, &other.ignore),
            (&mut self.ignore_destructive, &other.ignore_destructive),
            (&mut self.include, &other.include),
            (&mut self.include_destructive, &other.include_destructive),
        ] {
            if !value.is_empty() {
                *target = value.clone();
            }
        }
    }
}

fn non_empty(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
