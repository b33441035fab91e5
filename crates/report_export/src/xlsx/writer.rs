//! XLSX Writer
//!
//! Formats every table, builds the shared-string table once, then writes
//! each part into a stored archive.

use super::content_types::create_workbook_content_types;
use super::doc_props::{app_xml, core_xml};
use super::error::{XlsxError, XlsxResult};
use super::relationships::{create_root_rels, create_workbook_rels};
use super::shared_strings::SharedStrings;
use super::sheet_names::unique_sheet_names;
use super::styles::styles_xml;
use super::workbook::workbook_xml;
use super::worksheet::SheetContent;
use crate::archive::ArchiveBuilder;
use crate::options::{ExportOptions, Styling};
use chrono::NaiveDateTime;
use report_model::{ExportTable, Record};

/// A workbook whose cells are formatted and whose strings are pooled
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    sheets: Vec<SheetContent>,
    strings: SharedStrings,
    title: Option<String>,
    author: Option<String>,
    styling: Styling,
}

impl XlsxWorkbook {
    /// Format the tables and pool their strings
    pub fn prepare<R: Record>(
        tables: &[&ExportTable<R>],
        options: &ExportOptions,
    ) -> XlsxResult<Self> {
        if tables.is_empty() {
            return Err(XlsxError::NoSheets);
        }

        let raw_names: Vec<&str> = tables
            .iter()
            .map(|table| {
                // A lone unnamed table takes the document title
                if tables.len() == 1 && table.name.trim().is_empty() {
                    options.title.as_deref().unwrap_or("")
                } else {
                    table.name.as_str()
                }
            })
            .collect();
        let names = unique_sheet_names(&raw_names);

        let defaults = options.table_defaults();
        let sheets = tables
            .iter()
            .zip(names)
            .map(|(table, name)| SheetContent::prepare(*table, name, defaults))
            .collect::<XlsxResult<Vec<_>>>()?;

        let mut strings = SharedStrings::new();
        for sheet in &sheets {
            sheet.collect_strings(&mut strings);
        }

        Ok(Self {
            sheets,
            strings,
            title: options.title.clone(),
            author: options.author.clone(),
            styling: options.styling.clone(),
        })
    }

    pub fn sheets(&self) -> &[SheetContent] {
        &self.sheets
    }

    pub fn shared_strings(&self) -> &SharedStrings {
        &self.strings
    }

    /// Data rows across all sheets
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }

    /// Serialize every part and package them
    pub fn write(&self, generated_at: NaiveDateTime) -> XlsxResult<Vec<u8>> {
        let count = self.sheets.len();
        let names: Vec<&str> = self.sheets.iter().map(|s| s.name.as_str()).collect();

        let mut archive = ArchiveBuilder::new();
        archive.add("[Content_Types].xml", create_workbook_content_types(count).to_xml())?;
        archive.add("_rels/.rels", create_root_rels().to_xml())?;
        archive.add(
            "docProps/core.xml",
            core_xml(self.title.as_deref(), self.author.as_deref(), generated_at),
        )?;
        archive.add("docProps/app.xml", app_xml(&names))?;
        archive.add("xl/workbook.xml", workbook_xml(&self.sheets))?;
        archive.add("xl/_rels/workbook.xml.rels", create_workbook_rels(count).to_xml())?;
        archive.add("xl/styles.xml", styles_xml(&self.styling))?;
        archive.add("xl/sharedStrings.xml", self.strings.to_xml())?;
        for (i, sheet) in self.sheets.iter().enumerate() {
            archive.add(
                format!("xl/worksheets/sheet{}.xml", i + 1),
                sheet.to_xml(&self.strings, i == 0)?,
            )?;
        }

        let bytes = archive.finish()?;
        tracing::debug!(
            "xlsx workbook: {} sheets, {} shared strings, {} bytes",
            count,
            self.strings.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
