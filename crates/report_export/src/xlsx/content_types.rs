//! [Content_Types].xml generation
//!
//! This file declares the content type of every part in the package.

use super::content_type_values as ct;
use super::namespaces;
use super::xml::{escape_xml, XML_DECLARATION};
use std::collections::BTreeMap;

/// Content types of an XLSX package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by part name, in insertion order
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Content types with the `rels` and `xml` defaults
    pub fn new() -> Self {
        let mut types = Self::default();
        types.add_default("rels", ct::RELATIONSHIPS);
        types.add_default("xml", ct::XML);
        types
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    /// Add an override for a specific part, replacing any earlier one
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{}", part_name)
        };
        match self.overrides.iter_mut().find(|(part, _)| *part == normalized) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.overrides.push((normalized, content_type.to_string())),
        }
    }

    /// Look up the content type of a part
    pub fn get_content_type(&self, path: &str) -> Option<&str> {
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if let Some((_, content_type)) = self.overrides.iter().find(|(p, _)| *p == normalized) {
            return Some(content_type.as_str());
        }
        path.rsplit('.')
            .next()
            .and_then(|ext| self.defaults.get(ext))
            .map(String::as_str)
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespaces::CT));

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (part, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

/// Content types for a workbook with `sheet_count` worksheets
pub fn create_workbook_content_types(sheet_count: usize) -> ContentTypes {
    let mut types = ContentTypes::new();
    types.add_override("/xl/workbook.xml", ct::WORKBOOK);
    for n in 1..=sheet_count {
        types.add_override(&format!("/xl/worksheets/sheet{}.xml", n), ct::WORKSHEET);
    }
    types.add_override("/xl/styles.xml", ct::STYLES);
    types.add_override("/xl/sharedStrings.xml", ct::SHARED_STRINGS);
    types.add_override("/docProps/core.xml", ct::CORE_PROPERTIES);
    types.add_override("/docProps/app.xml", ct::EXTENDED_PROPERTIES);
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let types = ContentTypes::new();
        assert_eq!(types.get_content_type("_rels/.rels"), Some(ct::RELATIONSHIPS));
        assert_eq!(types.get_content_type("custom.xml"), Some(ct::XML));
        assert_eq!(types.get_content_type("image.png"), None);
    }

    #[test]
    fn test_workbook_overrides() {
        let types = create_workbook_content_types(2);
        assert_eq!(types.get_content_type("xl/workbook.xml"), Some(ct::WORKBOOK));
        assert_eq!(
            types.get_content_type("/xl/worksheets/sheet2.xml"),
            Some(ct::WORKSHEET)
        );
        assert_eq!(types.get_content_type("xl/worksheets/sheet3.xml"), Some(ct::XML));
    }

    #[test]
    fn test_to_xml_is_ordered() {
        let xml = create_workbook_content_types(1).to_xml();
        let rels = xml.find(r#"Extension="rels""#).unwrap();
        let xml_default = xml.find(r#"Extension="xml""#).unwrap();
        let workbook = xml.find("/xl/workbook.xml").unwrap();
        let sheet = xml.find("/xl/worksheets/sheet1.xml").unwrap();
        assert!(rels < xml_default && xml_default < workbook && workbook < sheet);
        assert!(xml.ends_with("</Types>"));
    }

    #[test]
    fn test_override_replaces() {
        let mut types = ContentTypes::new();
        types.add_override("a.xml", "one");
        types.add_override("/a.xml", "two");
        assert_eq!(types.get_content_type("a.xml"), Some("two"));
        assert_eq!(types.to_xml().matches("PartName").count(), 1);
    }
}
