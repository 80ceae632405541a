//! metadata::constants
//!
//! Type names and markers the resolver treats specially.

/// Separator used by diff paths, independent of the host platform.
pub const PATH_SEP: char = '/';

/// Marker appended to companion metadata files (`Foo.cls-meta.xml`).
pub const METAFILE_SUFFIX: &str = "-meta.xml";

pub const OBJECT_TYPE: &str = "CustomObject";
pub const OBJECT_TRANSLATION_TYPE: &str = "CustomObjectTranslation";
pub const TERRITORY_MODEL_TYPE: &str = "Territory2Model";
pub const WORKFLOW_TYPE: &str = "Workflow";
pub const SHARING_RULE_TYPE: &str = "SharingRules";

pub const CUSTOM_APPLICATION_SUFFIX: &str = "app";
pub const CUSTOM_METADATA_SUFFIX: &str = "md";
pub const EMAIL_SERVICES_FUNCTION_SUFFIX: &str = "xml";

/// Types stored as children inside an object folder.
pub const SUB_OBJECT_TYPES: &[&str] = &[
    "BusinessProcess",
    "CompactLayout",
    "CustomField",
    "FieldSet",
    "Index",
    "ListView",
    "RecordType",
    "SharingReason",
    "ValidationRule",
    "WebLink",
];

/// Directory types that may contain a more specific type deeper in the path.
///
/// The empty name covers shared-folder containers, which carry no type name
/// of their own.
pub const TYPES_WITH_SUB_TYPES: &[&str] = &[
    OBJECT_TYPE,
    TERRITORY_MODEL_TYPE,
    WORKFLOW_TYPE,
    SHARING_RULE_TYPE,
    "",
];

/// Extensions too generic to identify a type on their own.
pub const AMBIGUOUS_EXTENSIONS: &[&str] = &[
    CUSTOM_APPLICATION_SUFFIX,
    EMAIL_SERVICES_FUNCTION_SUFFIX,
    CUSTOM_METADATA_SUFFIX,
];

/// Whether a directory match for `xml_name` may be overridden deeper in the path.
pub fn has_sub_types(xml_name: &str) -> bool {
    TYPES_WITH_SUB_TYPES.contains(&xml_name)
}

/// Whether `xml_name` is addressed by a path-derived compound name.
pub fn is_composed(xml_name: &str) -> bool {
    matches!(
        xml_name,
        OBJECT_TYPE | OBJECT_TRANSLATION_TYPE | WORKFLOW_TYPE | SHARING_RULE_TYPE
    ) || SUB_OBJECT_TYPES.contains(&xml_name)
}
