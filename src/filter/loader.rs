//! filter::loader
//!
//! Pattern-file loading.
//!
//! # Design
//!
//! The `PatternLoader` trait is async because it is the only I/O the filters
//! perform. It runs while a filter is constructed, never per line.
//! [`FsPatternLoader`] reads from disk; tests can supply their own loader.
//!
//! # Example
//!
//! ```ignore
//! use metadelta::filter::{FsPatternLoader, PatternLoader};
//!
//! let contents = FsPatternLoader.load(Path::new(".forceignore")).await?;
//! ```

use std::path::Path;

use async_trait::async_trait;

use super::FilterError;

/// Source of pattern-file contents.
#[async_trait]
pub trait PatternLoader: Send + Sync {
    /// Read the full text of the pattern file at `path`.
    async fn load(&self, path: &Path) -> Result<String, FilterError>;
}

/// Reads pattern files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPatternLoader;

#[async_trait]
impl PatternLoader for FsPatternLoader {
    async fn load(&self, path: &Path) -> Result<String, FilterError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FilterError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}
