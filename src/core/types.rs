//! core::types
//!
//! Strong types for diff-line classification.
//!
//! # Types
//!
//! - [`ChangeKind`] - What a diff line does to its path
//! - [`DiffLine`] - A diff line split into its change kind and path
//!
//! # Line Format
//!
//! A diff line is a single-character change marker, whitespace, then a
//! repository-relative path:
//!
//! ```text
//! A force-app/main/default/classes/Foo.cls
//! M force-app/main/default/classes/Foo.cls-meta.xml
//! D force-app/main/default/objects/Account/fields/Name__c.field-meta.xml
//! ```
//!
//! # Examples
//!
//! ```
//! use metadelta::core::types::{ChangeKind, DiffLine};
//!
//! let line = DiffLine::parse("D path/to/file.ext");
//! assert_eq!(line.kind, ChangeKind::Deletion);
//! assert_eq!(line.path, "path/to/file.ext");
//! assert!(line.kind.is_destructive());
//! ```

use std::fmt;

/// Marker for an added file.
pub const ADDITION: char = 'A';

/// Marker for a modified file.
pub const MODIFICATION: char = 'M';

/// Marker for a deleted file.
pub const DELETION: char = 'D';

/// Marker for a line that is always kept verbatim.
pub const PINNED: char = '!';

/// The change a diff line applies to its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Addition,
    Modification,
    Deletion,
    /// `!` lines bypass every filter.
    Pinned,
    /// Any other marker (or an empty line). Governed by the general policy.
    Unknown,
}

impl ChangeKind {
    /// Classify a change marker.
    pub fn from_marker(marker: char) -> Self {
        match marker {
            ADDITION => ChangeKind::Addition,
            MODIFICATION => ChangeKind::Modification,
            DELETION => ChangeKind::Deletion,
            PINNED => ChangeKind::Pinned,
            _ => ChangeKind::Unknown,
        }
    }

    /// Whether the destructive policy governs this change.
    pub fn is_destructive(self) -> bool {
        self == ChangeKind::Deletion
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Addition => "addition",
            ChangeKind::Modification => "modification",
            ChangeKind::Deletion => "deletion",
            ChangeKind::Pinned => "pinned",
            ChangeKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// A diff line split into its change kind and path.
///
/// Borrowed from the input line; parsing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLine<'a> {
    /// Change kind derived from the first character.
    pub kind: ChangeKind,
    /// Path with the marker and separating whitespace removed.
    pub path: &'a str,
}

impl<'a> DiffLine<'a> {
    /// Split a diff line into change kind and path.
    ///
    /// The marker is only stripped when it is followed by whitespace; a line
    /// such as `path/to/file` without a marker keeps its full text as path.
    pub fn parse(line: &'a str) -> Self {
        let mut chars = line.chars();
        let Some(marker) = chars.next() else {
            return Self {
                kind: ChangeKind::Unknown,
                path: line,
            };
        };

        let rest = chars.as_str();
        let trimmed = rest.trim_start();
        let path = if trimmed.len() < rest.len() {
            trimmed
        } else {
            line
        };

        Self {
            kind: ChangeKind::from_marker(marker),
            path,
        }
    }
}
