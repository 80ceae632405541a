//! filter
//!
//! Keep/discard policies for diff lines.
//!
//! # Semantics
//!
//! A [`ChangeFilter`] holds two pattern sets: a general one for additions and
//! modifications, and a destructive one for deletions.
//!
//! - **Ignore**: a line is discarded when its set matches the path. The
//!   destructive set falls back to the general pattern file when no
//!   destructive file is configured, and always carries `recordTypes/`
//!   because record types cannot be deleted through the metadata API.
//! - **Include**: an empty set keeps everything; a non-empty set keeps only
//!   the paths it matches. No fallback, no built-in rules.
//!
//! Lines starting with `!` are kept under both semantics.
//!
//! # Example
//!
//! ```ignore
//! use metadelta::filter::{ChangeFilter, FilterSources, FsPatternLoader};
//!
//! let sources = FilterSources::new(Some(".forceignore".into()), None);
//! let filter = ChangeFilter::for_ignore(&sources, &FsPatternLoader).await?;
//!
//! assert!(!filter.keep("D force-app/objects/Account/recordTypes/IT.recordType-meta.xml"));
//! ```

pub mod loader;
pub mod pattern;

pub use loader::{FsPatternLoader, PatternLoader};
pub use pattern::{PatternScope, PatternSet};

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::types::{ChangeKind, DiffLine};

/// Rules always added to the destructive ignore set.
pub const BASE_DESTRUCTIVE_IGNORE: &[&str] = &["recordTypes/"];

/// Errors from building a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to read pattern file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid pattern '{rule}': {message}")]
    Pattern { rule: String, message: String },
}

/// How a filter interprets a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Matching paths are discarded.
    Ignore,
    /// Matching paths are kept; with patterns configured, the rest is discarded.
    Include,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Ignore => write!(f, "ignore"),
            FilterMode::Include => write!(f, "include"),
        }
    }
}

/// Configured pattern files for one filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSources {
    general: Option<PathBuf>,
    destructive: Option<PathBuf>,
}

impl FilterSources {
    pub fn new(general: Option<PathBuf>, destructive: Option<PathBuf>) -> Self {
        Self {
            general,
            destructive,
        }
    }

    pub fn general(&self) -> Option<&Path> {
        self.general.as_deref()
    }

    pub fn destructive(&self) -> Option<&Path> {
        self.destructive.as_deref()
    }
}

/// Sources with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedSources {
    general: Option<PathBuf>,
    destructive: Option<PathBuf>,
    builtin_destructive: &'static [&'static str],
}

impl ResolvedSources {
    fn for_mode(mode: FilterMode, sources: &FilterSources) -> Self {
        match mode {
            FilterMode::Ignore => Self {
                general: sources.general.clone(),
                destructive: sources
                    .destructive
                    .clone()
                    .or_else(|| sources.general.clone()),
                builtin_destructive: BASE_DESTRUCTIVE_IGNORE,
            },
            FilterMode::Include => Self {
                general: sources.general.clone(),
                destructive: sources.destructive.clone(),
                builtin_destructive: &[],
            },
        }
    }
}

/// Classifies diff lines as kept or discarded.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    mode: FilterMode,
    general: PatternSet,
    destructive: PatternSet,
}

impl ChangeFilter {
    /// Build a filter with ignore semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern file cannot be read or
    /// contains an invalid rule.
    pub async fn for_ignore(
        sources: &FilterSources,
        loader: &dyn PatternLoader,
    ) -> Result<Self, FilterError> {
        Self::build(FilterMode::Ignore, sources, loader).await
    }

    /// Build a filter with include semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern file cannot be read or
    /// contains an invalid rule.
    pub async fn for_include(
        sources: &FilterSources,
        loader: &dyn PatternLoader,
    ) -> Result<Self, FilterError> {
        Self::build(FilterMode::Include, sources, loader).await
    }

    async fn build(
        mode: FilterMode,
        sources: &FilterSources,
        loader: &dyn PatternLoader,
    ) -> Result<Self, FilterError> {
        let resolved = ResolvedSources::for_mode(mode, sources);

        let general = load_set(PatternScope::General, resolved.general.as_deref(), loader).await?;
        let destructive = load_set(
            PatternScope::Destructive,
            resolved.destructive.as_deref(),
            loader,
        )
        .await?
        .with_rules(resolved.builtin_destructive.iter().copied())?;

        debug!(
            %mode,
            general_rules = general.rules().len(),
            destructive_rules = destructive.rules().len(),
            "built change filter"
        );

        Ok(Self {
            mode,
            general,
            destructive,
        })
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Patterns applied to additions and modifications.
    pub fn general(&self) -> &PatternSet {
        &self.general
    }

    /// Patterns applied to deletions.
    pub fn destructive(&self) -> &PatternSet {
        &self.destructive
    }

    /// Whether the change described by `line` stays in the change-set.
    pub fn keep(&self, line: &str) -> bool {
        let line = DiffLine::parse(line);
        if line.kind == ChangeKind::Pinned {
            return true;
        }

        let patterns = if line.kind.is_destructive() {
            &self.destructive
        } else {
            &self.general
        };

        match self.mode {
            FilterMode::Ignore => !patterns.matches(line.path),
            FilterMode::Include => patterns.is_empty() || patterns.matches(line.path),
        }
    }
}

async fn load_set(
    scope: PatternScope,
    source: Option<&Path>,
    loader: &dyn PatternLoader,
) -> Result<PatternSet, FilterError> {
    match source {
        Some(path) => {
            let contents = loader.load(path).await?;
            PatternSet::from_lines(scope, contents.lines())
        }
        None => Ok(PatternSet::empty(scope)),
    }
}
