//! Shared strings table
//!
//! Built once per export from every header, every string cell, and the
//! totals label, then handed read-only to the worksheet writer.

use super::error::{XlsxError, XlsxResult};
use super::namespaces;
use super::xml::{escape_xml, needs_space_preserve, XML_DECLARATION};
use std::collections::HashMap;

/// Deduplicated string pool, indexed in first-seen order
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    /// Total references, counting repeats
    references: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string reference and return its index
    pub fn intern(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), i);
        i
    }

    /// Index of a string already in the table
    pub fn index_of(&self, s: &str) -> XlsxResult<usize> {
        self.index
            .get(s)
            .copied()
            .ok_or_else(|| XlsxError::MissingSharedString(s.to_string()))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of unique strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.strings.iter().map(|s| s.len() + 16).sum::<usize>());
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            namespaces::MAIN,
            self.references,
            self.strings.len()
        ));
        for s in &self.strings {
            if needs_space_preserve(s) {
                xml.push_str(r#"<si><t xml:space="preserve">"#);
            } else {
                xml.push_str("<si><t>");
            }
            xml.push_str(&escape_xml(s));
            xml.push_str("</t></si>");
        }
        xml.push_str("</sst>");
        xml
    }
}
