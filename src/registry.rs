//! registry
//!
//! Composition point owning the memoized instances.
//!
//! # Design
//!
//! The catalog, the metadata repository and both change filters are built
//! once and shared. Rather than hiding them in globals, the top-level caller
//! creates one [`Registry`] and hands out references to it. Every instance
//! is built through a `tokio::sync::OnceCell`, so concurrent first requests
//! perform a single load and nothing is published half-built. A failed
//! build leaves the cell empty and the next request tries again.
//!
//! The first successful build wins: asking for a filter again with another
//! configuration, or for the repository with another API version, returns
//! the original instance. [`Registry::reset`] clears everything and only
//! exists for tests.
//!
//! # Example
//!
//! ```ignore
//! use metadelta::core::types::DiffLine;
//! use metadelta::registry::Registry;
//!
//! let registry = Registry::new(config.definitions_dir());
//! let metadata = registry.metadata(config.api_version()).await?;
//! let ignore = registry.ignore_filter(config.filter()).await?;
//!
//! for line in diff_lines {
//!     if ignore.keep(line) && metadata.has(DiffLine::parse(line).path) { /* package it */ }
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::core::config::{ConfigError, FilterConfig};
use crate::filter::{ChangeFilter, FilterError, FsPatternLoader, PatternLoader};
use crate::metadata::{CatalogError, DefinitionCatalog, MetadataRepository, PathResolver};

/// Errors from building registry instances.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Owner of the process-wide instances.
pub struct Registry {
    catalog: DefinitionCatalog,
    loader: Arc<dyn PatternLoader>,
    metadata: OnceCell<Arc<dyn MetadataRepository>>,
    ignore: OnceCell<Arc<ChangeFilter>>,
    include: OnceCell<Arc<ChangeFilter>>,
}

impl Registry {
    /// Registry reading definitions from `definitions_dir` and pattern files
    /// from disk.
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self::with_loader(definitions_dir, Arc::new(FsPatternLoader))
    }

    /// Registry with a custom pattern loader.
    pub fn with_loader(
        definitions_dir: impl Into<PathBuf>,
        loader: Arc<dyn PatternLoader>,
    ) -> Self {
        Self {
            catalog: DefinitionCatalog::new(definitions_dir),
            loader,
            metadata: OnceCell::new(),
            ignore: OnceCell::new(),
            include: OnceCell::new(),
        }
    }

    /// The definition catalog.
    pub fn catalog(&self) -> &DefinitionCatalog {
        &self.catalog
    }

    /// The metadata repository, built from `api_version` on first call.
    pub async fn metadata(
        &self,
        api_version: u32,
    ) -> Result<Arc<dyn MetadataRepository>, RegistryError> {
        let repository = self
            .metadata
            .get_or_try_init(|| async {
                let index = self.catalog.get_definition(api_version).await?;
                debug!(api_version, "metadata repository ready");
                let repository: Arc<dyn MetadataRepository> = Arc::new(PathResolver::new(index));
                Ok::<_, RegistryError>(repository)
            })
            .await?;
        Ok(Arc::clone(repository))
    }

    /// The ignore filter, built from `config` on first call.
    pub async fn ignore_filter(
        &self,
        config: &FilterConfig,
    ) -> Result<Arc<ChangeFilter>, RegistryError> {
        let filter = self
            .ignore
            .get_or_try_init(|| async {
                config.validate()?;
                let filter =
                    ChangeFilter::for_ignore(&config.ignore_sources(), self.loader.as_ref()).await?;
                Ok::<_, RegistryError>(Arc::new(filter))
            })
            .await?;
        Ok(Arc::clone(filter))
    }

    /// The include filter, built from `config` on first call.
    pub async fn include_filter(
        &self,
        config: &FilterConfig,
    ) -> Result<Arc<ChangeFilter>, RegistryError> {
        let filter = self
            .include
            .get_or_try_init(|| async {
                config.validate()?;
                let filter =
                    ChangeFilter::for_include(&config.include_sources(), self.loader.as_ref())
                        .await?;
                Ok::<_, RegistryError>(Arc::new(filter))
            })
            .await?;
        Ok(Arc::clone(filter))
    }

    /// Drop every memoized instance, including the catalog's scan.
    #[cfg(any(test, feature = "test_hooks"))]
    pub fn reset(&mut self) {
        self.catalog = DefinitionCatalog::new(self.catalog.dir().to_path_buf());
        self.metadata = OnceCell::new();
        self.ignore = OnceCell::new();
        self.include = OnceCell::new();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("catalog", &self.catalog)
            .field("metadata", &self.metadata.initialized())
            .field("ignore", &self.ignore.initialized())
            .field("include", &self.include.initialized())
            .finish()
    }
}
