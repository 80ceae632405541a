//! metadata::catalog
//!
//! Discovery and loading of versioned definition files.
//!
//! # Layout
//!
//! The definitions directory holds one JSON file per API version, named
//! `<lowercase prefix><version>.json` (for example `a58.json`). Other files
//! are ignored.
//!
//! # Latest Supported Version
//!
//! The newest file is assumed to describe a release that is not generally
//! available yet, so the latest *supported* version is the second-highest
//! one discovered. With fewer than two files there is no supported version
//! and [`DefinitionCatalog::latest_supported_version`] returns `None`.
//!
//! # Caching
//!
//! The directory is scanned once. Each version's file is parsed at most once
//! per catalog; concurrent first loads of the same version may both read the
//! file, and the last one to finish replaces the cache entry whole.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), metadelta::metadata::CatalogError> {
//! use metadelta::metadata::DefinitionCatalog;
//!
//! let catalog = DefinitionCatalog::new("/opt/metadelta/definitions");
//! let latest = catalog.latest_supported_version().await?;
//!
//! // Unknown versions quietly use the latest supported one.
//! let index = catalog.get_definition(0).await?;
//! println!("{:?}: {} types", latest, index.metadata().len());
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::index::MetadataIndex;
use super::schema::parse_definitions;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The definitions directory or a definition file could not be read.
    #[error("failed to read definitions at '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A definition file is not a valid descriptor list.
    #[error("failed to parse definition file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Neither the requested version nor a latest supported one exists.
    #[error("no supported API version for request {requested} (discovered: {discovered:?})")]
    NoSupportedVersion {
        requested: u32,
        discovered: Vec<u32>,
    },
}

/// Versions discovered by the directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMap {
    files: BTreeMap<u32, String>,
}

impl VersionMap {
    /// Build from file names; names not matching the pattern are skipped.
    pub fn from_file_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let files = names
            .into_iter()
            .filter_map(|name| parse_version(name).map(|version| (version, name.to_string())))
            .collect();
        Self { files }
    }

    /// Discovered versions, ascending.
    pub fn versions(&self) -> Vec<u32> {
        self.files.keys().copied().collect()
    }

    /// Second-highest discovered version.
    pub fn latest_supported(&self) -> Option<u32> {
        self.files.keys().rev().nth(1).copied()
    }

    pub fn contains(&self, version: u32) -> bool {
        self.files.contains_key(&version)
    }

    /// File name for `version`.
    pub fn file_name(&self, version: u32) -> Option<&str> {
        self.files.get(&version).map(String::as_str)
    }
}

/// Version number of a definition file name (`^[a-z]+\d+\.json$`).
pub fn parse_version(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".json")?;
    let digits_at = stem.find(|c: char| c.is_ascii_digit())?;
    let (prefix, digits) = stem.split_at(digits_at);

    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Catalog of definition files in one directory.
#[derive(Debug)]
pub struct DefinitionCatalog {
    dir: PathBuf,
    versions: OnceCell<VersionMap>,
    definitions: Mutex<HashMap<u32, Arc<MetadataIndex>>>,
}

impl DefinitionCatalog {
    /// Create a catalog over `dir`. Nothing is read until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            versions: OnceCell::new(),
            definitions: Mutex::new(HashMap::new()),
        }
    }

    /// The definitions directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn version_map(&self) -> Result<&VersionMap, CatalogError> {
        self.versions.get_or_try_init(|| scan(&self.dir)).await
    }

    /// Scan the directory (once) and return the discovered versions, ascending.
    pub async fn list_supported_versions(&self) -> Result<Vec<u32>, CatalogError> {
        Ok(self.version_map().await?.versions())
    }

    /// Second-highest discovered version, or `None` with fewer than two files.
    pub async fn latest_supported_version(&self) -> Result<Option<u32>, CatalogError> {
        Ok(self.version_map().await?.latest_supported())
    }

    /// Whether a definition file exists for `version`.
    pub async fn is_supported(&self, version: u32) -> Result<bool, CatalogError> {
        Ok(self.version_map().await?.contains(version))
    }

    /// Index for `version`, or for the latest supported version if `version`
    /// has no definition file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` or `CatalogError::Parse` if the selected
    /// file cannot be loaded, and `CatalogError::NoSupportedVersion` if
    /// `version` is unknown and fewer than two versions were discovered.
    pub async fn get_definition(&self, version: u32) -> Result<Arc<MetadataIndex>, CatalogError> {
        let versions = self.version_map().await?;
        let selected = if versions.contains(version) {
            version
        } else {
            let latest = versions.latest_supported().ok_or_else(|| {
                CatalogError::NoSupportedVersion {
                    requested: version,
                    discovered: versions.versions(),
                }
            })?;
            debug!(
                requested = version,
                selected = latest,
                "unsupported API version, using latest supported"
            );
            latest
        };

        if let Some(index) = self.cached(selected) {
            return Ok(index);
        }

        let file_name = versions
            .file_name(selected)
            .ok_or_else(|| CatalogError::NoSupportedVersion {
                requested: version,
                discovered: versions.versions(),
            })?;
        let index = Arc::new(load(&self.dir.join(file_name)).await?);

        self.definitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(selected, Arc::clone(&index));
        Ok(index)
    }

    fn cached(&self, version: u32) -> Option<Arc<MetadataIndex>> {
        self.definitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&version)
            .cloned()
    }
}

async fn scan(dir: &Path) -> Result<VersionMap, CatalogError> {
    let read_error = |source| CatalogError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".json") && parse_version(name).is_none() {
                warn!(file = name, "skipping definition file with unexpected name");
            }
            names.push(name.to_string());
        }
    }

    let versions = VersionMap::from_file_names(names.iter().map(String::as_str));
    info!(
        dir = %dir.display(),
        versions = ?versions.versions(),
        latest_supported = ?versions.latest_supported(),
        "scanned definition catalog"
    );
    Ok(versions)
}

async fn load(path: &Path) -> Result<MetadataIndex, CatalogError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let definitions = parse_definitions(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded definition file");
    Ok(MetadataIndex::new(definitions))
}
