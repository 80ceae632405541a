//! metadata
//!
//! Versioned metadata definitions and path resolution.
//!
//! # Modules
//!
//! - [`catalog`] - Discovers definition files and loads one per API version
//! - [`schema`] - Descriptor types as found in the definition files
//! - [`index`] - Extension and directory lookup tables
//! - [`resolver`] - Path to type resolution and fully qualified names
//! - [`repository`] - Query trait handed to packaging code
//! - [`constants`] - Type names and markers with special handling
//!
//! # Flow
//!
//! ```text
//! DefinitionCatalog --get_definition--> MetadataIndex --> PathResolver
//!                                                          (MetadataRepository)
//! ```

pub mod catalog;
pub mod constants;
pub mod index;
pub mod repository;
pub mod resolver;
pub mod schema;

pub use catalog::{parse_version, CatalogError, DefinitionCatalog, VersionMap};
pub use index::{ExtensionSlot, InFileAttribute, MetadataIndex};
pub use repository::MetadataRepository;
pub use resolver::PathResolver;
pub use schema::{parse_definitions, Metadata, MetadataType};
