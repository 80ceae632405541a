//! metadata::index
//!
//! Lookup tables built once per definition list.
//!
//! # Extension Ambiguity
//!
//! A suffix claimed by more than one descriptor cannot identify a type. The
//! extension map stores [`ExtensionSlot::Ambiguous`] for such suffixes so the
//! resolver can refuse them and fall back to the directory walk. A few
//! generic extensions (`app`, `md`, `xml`) start out ambiguous whatever the
//! definitions say.
//!
//! # Derived Indexes
//!
//! The in-file attribute index and the shared-folder suffix index are only
//! needed by packaging code, so they are computed on first access and kept
//! for the lifetime of the index.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::constants::AMBIGUOUS_EXTENSIONS;
use super::schema::{Metadata, MetadataType};

/// Extension map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionSlot {
    /// Exactly one descriptor owns the extension.
    Unique(MetadataType),
    /// Several descriptors claim the extension; it identifies nothing.
    Ambiguous,
}

/// A child element type that lives inside another type's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFileAttribute {
    pub xml_name: String,
    pub key: Option<String>,
    pub excluded: bool,
}

/// Immutable lookup tables over one version's descriptors.
#[derive(Debug)]
pub struct MetadataIndex {
    metadata: Vec<Metadata>,
    by_extension: HashMap<String, ExtensionSlot>,
    by_directory: HashMap<String, MetadataType>,
    in_file_attributes: OnceLock<HashMap<String, InFileAttribute>>,
    shared_folder_metadata: OnceLock<HashMap<String, String>>,
}

impl MetadataIndex {
    /// Build the extension and directory maps for `metadata`.
    pub fn new(metadata: Vec<Metadata>) -> Self {
        let mut by_extension: HashMap<String, ExtensionSlot> = AMBIGUOUS_EXTENSIONS
            .iter()
            .map(|ext| (ext.to_string(), ExtensionSlot::Ambiguous))
            .collect();
        let mut by_directory = HashMap::new();

        for entry in &metadata {
            let descriptor = entry.descriptor();
            register_suffix(&mut by_extension, descriptor);

            for nested in entry.content() {
                if let Some(suffix) = nested.suffix() {
                    register_suffix(&mut by_extension, &descriptor.with_suffix(suffix));
                }
            }

            if let Some(directory) = descriptor.directory_name() {
                by_directory.insert(directory.to_string(), descriptor.clone());
            }
        }

        debug!(
            types = metadata.len(),
            extensions = by_extension.len(),
            directories = by_directory.len(),
            "built metadata index"
        );

        Self {
            metadata,
            by_extension,
            by_directory,
            in_file_attributes: OnceLock::new(),
            shared_folder_metadata: OnceLock::new(),
        }
    }

    /// Descriptor owning `extension`, unless the extension is ambiguous.
    pub fn by_extension(&self, extension: &str) -> Option<&MetadataType> {
        match self.by_extension.get(extension)? {
            ExtensionSlot::Unique(descriptor) => Some(descriptor),
            ExtensionSlot::Ambiguous => None,
        }
    }

    /// Raw extension map entry.
    pub fn extension_slot(&self, extension: &str) -> Option<&ExtensionSlot> {
        self.by_extension.get(extension)
    }

    /// Whether `extension` is claimed by several descriptors.
    pub fn is_ambiguous(&self, extension: &str) -> bool {
        matches!(
            self.by_extension.get(extension),
            Some(ExtensionSlot::Ambiguous)
        )
    }

    /// Descriptor owning the folder `segment`.
    pub fn by_directory(&self, segment: &str) -> Option<&MetadataType> {
        self.by_directory.get(segment)
    }

    /// Whether `segment` is a known folder name.
    pub fn has_directory(&self, segment: &str) -> bool {
        self.by_directory.contains_key(segment)
    }

    /// All entries, in definition-file order.
    pub fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }

    /// `xmlTag` to child element type, for every descriptor with a tag.
    pub fn in_file_attributes(&self) -> &HashMap<String, InFileAttribute> {
        self.in_file_attributes.get_or_init(|| {
            self.metadata
                .iter()
                .map(Metadata::descriptor)
                .filter_map(|descriptor| {
                    let tag = descriptor.xml_tag()?;
                    Some((
                        tag.to_string(),
                        InFileAttribute {
                            xml_name: descriptor.xml_name.clone(),
                            key: descriptor.key.clone(),
                            excluded: descriptor.excluded,
                        },
                    ))
                })
                .collect()
        })
    }

    /// Nested suffix to type name, across every shared folder.
    pub fn shared_folder_metadata(&self) -> &HashMap<String, String> {
        self.shared_folder_metadata.get_or_init(|| {
            self.metadata
                .iter()
                .flat_map(Metadata::content)
                .filter_map(|nested| {
                    let suffix = nested.suffix()?;
                    Some((suffix.to_string(), nested.xml_name.clone()))
                })
                .collect()
        })
    }

    /// Whether `xml_name` may be packaged on its own.
    ///
    /// Only in-file types explicitly marked `excluded` are not packable.
    pub fn is_packable(&self, xml_name: &str) -> bool {
        !self
            .in_file_attributes()
            .values()
            .any(|attribute| attribute.xml_name == xml_name && attribute.excluded)
    }
}

fn register_suffix(map: &mut HashMap<String, ExtensionSlot>, descriptor: &MetadataType) {
    let Some(suffix) = descriptor.suffix() else {
        return;
    };

    map.entry(suffix.to_string())
        .and_modify(|slot| *slot = ExtensionSlot::Ambiguous)
        .or_insert_with(|| ExtensionSlot::Unique(descriptor.clone()));
}
