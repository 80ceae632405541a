//! core
//!
//! Core domain types and configuration for metadelta.
//!
//! # Modules
//!
//! - [`types`] - Change kinds and diff-line parsing
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Parsing a diff line never fails; unknown markers are classified, not rejected
//! - Configuration is strict: unknown fields are rejected

pub mod config;
pub mod types;
