//! metadata::schema
//!
//! Metadata type descriptors as found in the versioned definition files.
//!
//! # Schema Design
//!
//! Each definition file is a JSON array of descriptors in camelCase. Most
//! entries describe one type. Shared-folder containers additionally list the
//! typed sub-resources stored in their folder under `content`; those become
//! [`Metadata::SharedFolder`] so the nested suffixes are always reachable
//! without checking an optional field.
//!
//! # Example
//!
//! ```
//! use metadelta::metadata::schema::{parse_definitions, Metadata};
//!
//! let json = r#"[
//!     { "xmlName": "ApexClass", "directoryName": "classes", "suffix": "cls" },
//!     {
//!         "directoryName": "moderation",
//!         "content": [
//!             { "xmlName": "KeywordList", "suffix": "keywords" },
//!             { "xmlName": "ModerationRule", "suffix": "rule" }
//!         ]
//!     }
//! ]"#;
//!
//! let definitions = parse_definitions(json).unwrap();
//! assert_eq!(definitions[0].descriptor().xml_name, "ApexClass");
//! assert!(matches!(definitions[1], Metadata::SharedFolder { .. }));
//! assert_eq!(definitions[1].content().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// One metadata type as described by a definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataType {
    /// Canonical type identifier. Shared-folder containers have none.
    #[serde(default)]
    pub xml_name: String,

    /// File extension owned by this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Folder name owned by this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_name: Option<String>,

    /// Element name when embedded as a child inside another file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_tag: Option<String>,

    /// Field identifying an embedded child element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Never packaged on its own even though it has an `xml_tag`
    #[serde(default)]
    pub excluded: bool,

    #[serde(default)]
    pub in_folder: bool,

    #[serde(default)]
    pub meta_file: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_xml_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_xml_names: Vec<String>,
}

impl MetadataType {
    /// The suffix, treating an empty string as absent.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref().filter(|s| !s.is_empty())
    }

    /// The directory name, treating an empty string as absent.
    pub fn directory_name(&self) -> Option<&str> {
        self.directory_name.as_deref().filter(|s| !s.is_empty())
    }

    /// The xml tag, treating an empty string as absent.
    pub fn xml_tag(&self) -> Option<&str> {
        self.xml_tag.as_deref().filter(|s| !s.is_empty())
    }

    /// Copy of this descriptor owning `suffix` instead of its own.
    ///
    /// Used to register the nested suffixes of a shared folder under the
    /// folder's own attributes.
    pub fn with_suffix(&self, suffix: &str) -> MetadataType {
        MetadataType {
            suffix: Some(suffix.to_string()),
            ..self.clone()
        }
    }
}

/// A definition-file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMetadata", into = "RawMetadata")]
pub enum Metadata {
    /// A type identified by its own suffix and/or folder.
    Simple(MetadataType),

    /// A folder whose files are typed by their nested suffix.
    SharedFolder {
        base: MetadataType,
        content: Vec<MetadataType>,
    },
}

impl Metadata {
    /// The descriptor of the entry itself.
    pub fn descriptor(&self) -> &MetadataType {
        match self {
            Metadata::Simple(base) | Metadata::SharedFolder { base, .. } => base,
        }
    }

    /// Nested descriptors; empty for simple entries.
    pub fn content(&self) -> &[MetadataType] {
        match self {
            Metadata::Simple(_) => &[],
            Metadata::SharedFolder { content, .. } => content,
        }
    }
}

/// Wire shape of a definition entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    #[serde(flatten)]
    base: MetadataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<MetadataType>>,
}

impl From<RawMetadata> for Metadata {
    fn from(raw: RawMetadata) -> Self {
        match raw.content {
            Some(content) => Metadata::SharedFolder {
                base: raw.base,
                content,
            },
            None => Metadata::Simple(raw.base),
        }
    }
}

impl From<Metadata> for RawMetadata {
    fn from(metadata: Metadata) -> Self {
        match metadata {
            Metadata::Simple(base) => RawMetadata {
                base,
                content: None,
            },
            Metadata::SharedFolder { base, content } => RawMetadata {
                base,
                content: Some(content),
            },
        }
    }
}

/// Parse the contents of a definition file.
pub fn parse_definitions(json: &str) -> Result<Vec<Metadata>, serde_json::Error> {
    serde_json::from_str(json)
}
