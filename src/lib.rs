//! metadelta - classify diff paths against versioned metadata definitions
//!
//! metadelta takes the file paths produced by a version-control diff and
//! decides, for each one, which metadata type it belongs to and whether it
//! should be part of the change-set being built.
//!
//! # Architecture
//!
//! The codebase is layered leaf-first:
//!
//! - [`core`] - Domain types (change kinds, diff lines) and configuration
//! - [`metadata`] - Definition catalog, metadata index and path resolution
//! - [`filter`] - Ignore/include policies applied to diff lines
//! - [`registry`] - Composition point owning the memoized instances
//! - [`cli`] - Thin command-line front-end over the registry
//!
//! # Invariants
//!
//! 1. Indexes and pattern sets are immutable once published
//! 2. Unknown API versions degrade to the latest supported version
//! 3. An extension claimed by several types never resolves by extension
//! 4. Deleting record types is never part of a destructive change-set

pub mod cli;
pub mod core;
pub mod filter;
pub mod metadata;
pub mod registry;
