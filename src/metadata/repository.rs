//! metadata::repository
//!
//! Query interface over one version's metadata definitions.
//!
//! # Design
//!
//! Packaging code only needs to ask "what type is this path" and a few
//! questions about in-file and shared-folder types. The `MetadataRepository`
//! trait captures exactly that so consumers hold an
//! `Arc<dyn MetadataRepository>` and never touch the index directly.
//!
//! # Example
//!
//! ```ignore
//! use metadelta::metadata::MetadataRepository;
//!
//! fn describe(repo: &dyn MetadataRepository, path: &str) -> String {
//!     match repo.get(path) {
//!         Some(metadata) => format!("{} ({})", metadata.xml_name, repo.fully_qualified_name(path)),
//!         None => "unknown".to_string(),
//!     }
//! }
//! ```

use std::collections::HashMap;

use super::index::InFileAttribute;
use super::schema::{Metadata, MetadataType};

/// Read-only queries over a metadata catalog version.
pub trait MetadataRepository: Send + Sync {
    /// Whether `path` resolves to a type.
    fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// The type `path` belongs to, if any.
    fn get(&self, path: &str) -> Option<&MetadataType>;

    /// Name identifying the component at `path` within its type.
    fn fully_qualified_name(&self, path: &str) -> String;

    /// Every definition entry.
    fn values(&self) -> &[Metadata];

    /// Whether `xml_name` may be packaged on its own.
    fn is_packable(&self, xml_name: &str) -> bool;

    /// `xmlTag` to child element type.
    fn in_file_attributes(&self) -> &HashMap<String, InFileAttribute>;

    /// Shared-folder suffix to type name.
    fn shared_folder_metadata(&self) -> &HashMap<String, String>;
}
