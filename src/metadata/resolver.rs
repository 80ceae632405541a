//! metadata::resolver
//!
//! Resolves repository-relative paths to metadata types.
//!
//! # Resolution Order
//!
//! 1. **Extension**: the last segment, minus the `-meta.xml` marker, is
//!    looked up by extension. Ambiguous extensions are refused.
//! 2. **Directory**: otherwise the segments are walked in order. Each known
//!    folder replaces the running candidate. The walk stops at the first
//!    candidate that cannot hold sub-types, so
//!    `objects/Account/listViews/All.xml` resolves to `ListView` rather than
//!    `CustomObject`.
//!
//! # Fully Qualified Names
//!
//! Composed types (objects, their children, workflows, sharing rules) are
//! named by the path from their type folder onward with separators removed.
//! Everything else is named by its file name.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use metadelta::metadata::{parse_definitions, MetadataIndex, MetadataRepository, PathResolver};
//!
//! let definitions = parse_definitions(r#"[
//!     { "xmlName": "CustomObject", "directoryName": "objects", "suffix": "object" },
//!     { "xmlName": "CustomField", "directoryName": "fields", "suffix": "field" }
//! ]"#).unwrap();
//! let resolver = PathResolver::new(Arc::new(MetadataIndex::new(definitions)));
//!
//! let path = "force-app/objects/Account/fields/Name__c.field-meta.xml";
//! assert_eq!(resolver.get(path).unwrap().xml_name, "CustomField");
//! assert_eq!(resolver.fully_qualified_name(path), "objectsAccountfieldsName__c.field-meta.xml");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::constants::{has_sub_types, is_composed, METAFILE_SUFFIX, PATH_SEP};
use super::index::{InFileAttribute, MetadataIndex};
use super::repository::MetadataRepository;
use super::schema::{Metadata, MetadataType};

/// Path resolution over a shared [`MetadataIndex`].
#[derive(Debug, Clone)]
pub struct PathResolver {
    index: Arc<MetadataIndex>,
}

impl PathResolver {
    pub fn new(index: Arc<MetadataIndex>) -> Self {
        Self { index }
    }

    /// The underlying index.
    pub fn index(&self) -> &Arc<MetadataIndex> {
        &self.index
    }

    /// Resolve `path` to its type.
    pub fn resolve(&self, path: &str) -> Option<&MetadataType> {
        let parts: Vec<&str> = path.split(PATH_SEP).collect();
        self.search_by_extension(&parts)
            .or_else(|| self.search_by_directory(&parts))
    }

    fn search_by_extension(&self, parts: &[&str]) -> Option<&MetadataType> {
        let file_name = parts.last()?.replacen(METAFILE_SUFFIX, "", 1);
        self.index.by_extension(extension(&file_name))
    }

    fn search_by_directory(&self, parts: &[&str]) -> Option<&MetadataType> {
        let mut candidate = None;
        for part in parts {
            candidate = self.index.by_directory(part).or(candidate);
            if let Some(metadata) = candidate {
                if !has_sub_types(&metadata.xml_name) {
                    break;
                }
            }
        }
        candidate
    }

    /// Name of the component at `path`.
    pub fn fully_qualified_name(&self, path: &str) -> String {
        let trimmed = path.trim_end_matches(PATH_SEP);
        let base_name = trimmed.rsplit(PATH_SEP).next().unwrap_or(trimmed).to_string();

        let Some(metadata) = self.resolve(path) else {
            return base_name;
        };
        if !is_composed(&metadata.xml_name) {
            return base_name;
        }

        let parts: Vec<&str> = path.split(PATH_SEP).collect();
        match parts.iter().position(|part| self.index.has_directory(part)) {
            Some(start) => parts[start..].concat(),
            None => base_name,
        }
    }
}

/// Extension of a file name, without the dot.
///
/// A leading dot does not start an extension (`.gitignore` has none).
fn extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[idx + 1..],
        _ => "",
    }
}

impl MetadataRepository for PathResolver {
    fn get(&self, path: &str) -> Option<&MetadataType> {
        self.resolve(path)
    }

    fn fully_qualified_name(&self, path: &str) -> String {
        PathResolver::fully_qualified_name(self, path)
    }

    fn values(&self) -> &[Metadata] {
        self.index.metadata()
    }

    fn is_packable(&self, xml_name: &str) -> bool {
        self.index.is_packable(xml_name)
    }

    fn in_file_attributes(&self) -> &HashMap<String, InFileAttribute> {
        self.index.in_file_attributes()
    }

    fn shared_folder_metadata(&self) -> &HashMap<String, String> {
        self.index.shared_folder_metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::schema::parse_definitions;

    const DEFINITIONS: &str = r#"[
        { "xmlName": "ApexClass", "directoryName": "classes", "suffix": "cls", "metaFile": true },
        { "xmlName": "CustomObject", "directoryName": "objects", "suffix": "object" },
        { "xmlName": "CustomField", "directoryName": "fields", "suffix": "field" },
        { "xmlName": "ListView", "directoryName": "listViews", "suffix": "listView" },
        { "xmlName": "RecordType", "directoryName": "recordTypes", "suffix": "recordType" },
        { "xmlName": "CustomMetadata", "directoryName": "customMetadata", "suffix": "md" },
        { "xmlName": "CustomSite", "directoryName": "sites", "suffix": "site" },
        { "xmlName": "SiteDotCom", "directoryName": "siteDotComSites", "suffix": "site" },
        { "xmlName": "Territory2Model", "directoryName": "territory2Models", "suffix": "territory2Model" },
        { "xmlName": "Territory2Rule", "directoryName": "rules", "suffix": "territory2Rule" },
        {
            "directoryName": "moderation",
            "content": [
                { "xmlName": "KeywordList", "suffix": "keywords" },
                { "xmlName": "ModerationRule", "suffix": "rule" }
            ]
        }
    ]"#;

    fn resolver() -> PathResolver {
        let definitions = parse_definitions(DEFINITIONS).unwrap();
        PathResolver::new(Arc::new(MetadataIndex::new(definitions)))
    }

    fn xml_name(resolver: &PathResolver, path: &str) -> Option<String> {
        resolver.resolve(path).map(|m| m.xml_name.clone())
    }

    #[test]
    fn extension_helper() {
        assert_eq!(extension("Foo.cls"), "cls");
        assert_eq!(extension("Foo.Bar.md"), "md");
        assert_eq!(extension(".gitignore"), "");
        assert_eq!(extension("README"), "");
    }

    #[test]
    fn resolves_by_extension() {
        let resolver = resolver();
        assert_eq!(
            xml_name(&resolver, "force-app/main/default/classes/Foo.cls").as_deref(),
            Some("ApexClass")
        );
        assert_eq!(
            xml_name(&resolver, "force-app/main/default/classes/Foo.cls-meta.xml").as_deref(),
            Some("ApexClass")
        );
    }

    #[test]
    fn extension_wins_over_folder() {
        let resolver = resolver();
        assert_eq!(
            xml_name(&resolver, "classes/Foo.field-meta.xml").as_deref(),
            Some("CustomField")
        );
    }

    #[test]
    fn ambiguous_extension_falls_back_to_directory() {
        let resolver = resolver();
        assert_eq!(
            xml_name(&resolver, "force-app/sites/Portal.site-meta.xml").as_deref(),
            Some("CustomSite")
        );
        assert_eq!(
            xml_name(&resolver, "force-app/siteDotComSites/Portal.site").as_deref(),
            Some("SiteDotCom")
        );
        assert_eq!(
            xml_name(&resolver, "force-app/customMetadata/Foo.Bar.md-meta.xml").as_deref(),
            Some("CustomMetadata")
        );
    }

    #[test]
    fn deeper_folder_overrides_sub_type_container() {
        let resolver = resolver();
        assert_eq!(
            xml_name(&resolver, "force-app/objects/Account/listViews/All.xml").as_deref(),
            Some("ListView")
        );
        assert_eq!(
            xml_name(&resolver, "force-app/territory2Models/EU/rules/R.xml").as_deref(),
            Some("Territory2Rule")
        );
    }

    #[test]
    fn container_kept_without_deeper_folder() {
        let resolver = resolver();
        assert_eq!(
            xml_name(&resolver, "force-app/objects/Account/Account.xml").as_deref(),
            Some("CustomObject")
        );
    }

    #[test]
    fn shared_folder_content_resolves_by_nested_suffix() {
        let resolver = resolver();
        let metadata = resolver
            .resolve("force-app/moderation/Banned.keywords-meta.xml")
            .unwrap();
        assert_eq!(metadata.xml_name, "");
        assert_eq!(metadata.directory_name(), Some("moderation"));
    }

    #[test]
    fn unresolved_paths() {
        let resolver = resolver();
        assert!(resolver.resolve("README.md").is_none());
        assert!(resolver.resolve("do not exist").is_none());
        assert!(resolver.resolve("").is_none());
        assert!(!resolver.has("docs/guide.txt"));
        assert!(resolver.has("classes/Foo.cls"));
    }

    #[test]
    fn fully_qualified_name_for_composed_type() {
        let resolver = resolver();
        assert_eq!(
            resolver.fully_qualified_name(
                "force-app/main/default/objects/Account/fields/Name__c.field-meta.xml"
            ),
            "objectsAccountfieldsName__c.field-meta.xml"
        );
        assert_eq!(
            resolver.fully_qualified_name("force-app/objects/Account/Account.object-meta.xml"),
            "objectsAccountAccount.object-meta.xml"
        );
    }

    #[test]
    fn fully_qualified_name_for_plain_type() {
        let resolver = resolver();
        assert_eq!(
            resolver.fully_qualified_name("force-app/main/default/classes/Foo.cls"),
            "Foo.cls"
        );
        assert_eq!(resolver.fully_qualified_name("README.md"), "README.md");
    }

    #[test]
    fn fully_qualified_name_ignores_trailing_separator() {
        let resolver = resolver();
        assert_eq!(resolver.fully_qualified_name("a/b/"), "b");
        assert_eq!(
            resolver.fully_qualified_name("force-app/main/default/classes/"),
            "classes"
        );
    }

    #[test]
    fn values_lists_every_entry() {
        let resolver = resolver();
        assert_eq!(resolver.values().len(), 11);
    }
}
