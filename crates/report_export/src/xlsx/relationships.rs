//! Relationships (.rels) generation
//!
//! XLSX uses relationships to connect the package parts together.

use super::namespaces;
use super::relationship_types;
use super::xml::{escape_xml, XML_DECLARATION};

/// A single relationship in a .rels file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the source part
    pub target: String,
}

/// Relationships of one part, in insertion order
#[derive(Debug, Clone)]
pub struct Relationships {
    relationships: Vec<Relationship>,
    next_id: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

impl Relationships {
    pub fn new() -> Self {
        Self {
            relationships: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a relationship and return its ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;
        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });
        id
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn get_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespaces::PKG_REL));

        for rel in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id,
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// The package-level `_rels/.rels`
pub fn create_root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::OFFICE_DOCUMENT, "xl/workbook.xml");
    rels.add(relationship_types::CORE_PROPERTIES, "docProps/core.xml");
    rels.add(relationship_types::EXTENDED_PROPERTIES, "docProps/app.xml");
    rels
}

/// `xl/_rels/workbook.xml.rels`: sheets take `rId1..rIdN`
pub fn create_workbook_rels(sheet_count: usize) -> Relationships {
    let mut rels = Relationships::new();
    for n in 1..=sheet_count {
        rels.add(relationship_types::WORKSHEET, &format!("worksheets/sheet{}.xml", n));
    }
    rels.add(relationship_types::STYLES, "styles.xml");
    rels.add(relationship_types::SHARED_STRINGS, "sharedStrings.xml");
    rels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_rels() {
        let rels = create_root_rels();
        assert_eq!(rels.len(), 3);
        assert_eq!(rels.get("rId1").unwrap().target, "xl/workbook.xml");
        assert_eq!(
            rels.get_by_type(relationship_types::CORE_PROPERTIES).unwrap().id,
            "rId2"
        );
    }

    #[test]
    fn test_workbook_rels_numbering() {
        let rels = create_workbook_rels(3);
        assert_eq!(rels.get("rId3").unwrap().target, "worksheets/sheet3.xml");
        assert_eq!(rels.get("rId4").unwrap().target, "styles.xml");
        assert_eq!(rels.get("rId5").unwrap().target, "sharedStrings.xml");
    }

    #[test]
    fn test_to_xml() {
        let xml = create_root_rels().to_xml();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#));
        assert!(xml.ends_with("</Relationships>"));
    }
}
