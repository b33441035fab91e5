//! Worksheet part generation
//!
//! A [`SheetContent`] is a table whose cells have already been formatted for
//! the spreadsheet. Writing it only looks strings up in the shared table.

use super::cell_ref::{cell_ref, column_letters, range_ref};
use super::error::{XlsxError, XlsxResult};
use super::namespaces;
use super::shared_strings::SharedStrings;
use super::styles::CellStyle;
use super::xml::XML_DECLARATION;
use super::{MAX_COLUMNS, MAX_ROWS};
use report_model::{
    format_cell, format_value, CellKind, DataType, ExportTable, FormattedCell, OutputTarget,
    Record, TableFlags,
};

/// Label written in the first column of a totals row
pub const TOTAL_LABEL: &str = "Total";

/// Rows sampled when sizing a column to its content
const AUTO_WIDTH_SAMPLE_ROWS: usize = 1000;
const MIN_AUTO_WIDTH: f64 = 8.0;
const MAX_AUTO_WIDTH: f64 = 60.0;
const AUTO_WIDTH_PADDING: f64 = 2.0;

/// A visible column as written to the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub header: String,
    pub data_type: DataType,
    /// Width in characters
    pub width: f64,
    /// Summed in the totals row
    pub totaled: bool,
}

/// A table formatted for the spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetContent {
    pub name: String,
    pub columns: Vec<SheetColumn>,
    pub rows: Vec<Vec<FormattedCell>>,
    pub flags: TableFlags,
}

impl SheetContent {
    /// Format every visible cell of `table`
    pub fn prepare<R: Record>(
        table: &ExportTable<R>,
        name: String,
        defaults: TableFlags,
    ) -> XlsxResult<Self> {
        let visible = table.visible_columns();
        if visible.len() > MAX_COLUMNS {
            return Err(XlsxError::TooManyColumns {
                sheet: name,
                columns: visible.len(),
            });
        }
        let flags = table.flags(defaults);
        let rows = table.row_slice();
        let needed = rows.len() + 1 + usize::from(flags.include_totals);
        if needed > MAX_ROWS {
            return Err(XlsxError::TooManyRows {
                sheet: name,
                rows: needed,
            });
        }

        let formatted: Vec<Vec<FormattedCell>> = rows
            .iter()
            .map(|row| {
                visible
                    .iter()
                    .map(|col| format_cell(*col, row, OutputTarget::Spreadsheet))
                    .collect()
            })
            .collect();

        let columns = visible
            .iter()
            .map(|col| {
                let width = col.declared_width().unwrap_or_else(|| {
                    // Size by display text, which is what the reader sees
                    let longest = rows
                        .iter()
                        .take(AUTO_WIDTH_SAMPLE_ROWS)
                        .map(|row| match &col.formatter {
                            Some(_) => format_cell(*col, row, OutputTarget::Document).text,
                            None => {
                                format_value(&col.value_of(row), col.data_type, OutputTarget::Document)
                                    .text
                            }
                        })
                        .map(|text| text.chars().count())
                        .max()
                        .unwrap_or(0);
                    auto_width(col.header.chars().count().max(longest))
                });
                SheetColumn {
                    header: col.header.clone(),
                    data_type: col.data_type,
                    width,
                    totaled: col.is_totaled(),
                }
            })
            .collect();

        Ok(Self {
            name,
            columns,
            rows: formatted,
            flags,
        })
    }

    /// Whether a totals row is written
    pub fn has_totals(&self) -> bool {
        self.flags.include_totals && !self.columns.is_empty()
    }

    /// 1-based row number of the last data row (the header when empty)
    fn last_data_row(&self) -> usize {
        self.rows.len() + 1
    }

    fn last_column(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    /// Range covered by the auto-filter: header plus data rows
    pub fn filter_range(&self) -> Option<((usize, usize), (usize, usize))> {
        if self.flags.auto_filter && !self.columns.is_empty() {
            Some(((0, 1), (self.last_column(), self.last_data_row())))
        } else {
            None
        }
    }

    /// Add every string this sheet references to the shared table
    pub fn collect_strings(&self, strings: &mut SharedStrings) {
        for col in &self.columns {
            strings.intern(&col.header);
        }
        for cell in self.rows.iter().flatten() {
            if cell.kind == CellKind::String && !cell.is_empty() {
                strings.intern(&cell.text);
            }
        }
        if self.has_totals() && !self.columns[0].totaled {
            strings.intern(TOTAL_LABEL);
        }
    }

    /// Serialize the worksheet part
    pub fn to_xml(&self, strings: &SharedStrings, selected: bool) -> XlsxResult<String> {
        let mut xml = String::with_capacity(1024 + self.rows.len() * self.columns.len() * 32);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            namespaces::MAIN,
            namespaces::R
        ));

        let last_row = self.last_data_row() + usize::from(self.has_totals());
        let dimension = if self.columns.is_empty() {
            "A1".to_string()
        } else {
            range_ref((0, 1), (self.last_column(), last_row))
        };
        xml.push_str(&format!(r#"<dimension ref="{}"/>"#, dimension));

        self.write_sheet_views(&mut xml, selected);
        xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);
        self.write_cols(&mut xml);

        xml.push_str("<sheetData>");
        self.write_header_row(&mut xml, strings)?;
        for (i, row) in self.rows.iter().enumerate() {
            self.write_data_row(&mut xml, strings, i, row)?;
        }
        if self.has_totals() {
            self.write_totals_row(&mut xml, strings)?;
        }
        xml.push_str("</sheetData>");

        if let Some((first, last)) = self.filter_range() {
            xml.push_str(&format!(r#"<autoFilter ref="{}"/>"#, range_ref(first, last)));
        }
        xml.push_str(
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        );
        xml.push_str("</worksheet>");
        Ok(xml)
    }

    fn write_sheet_views(&self, xml: &mut String, selected: bool) {
        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0""#);
        if selected {
            xml.push_str(r#" tabSelected="1""#);
        }
        if self.flags.freeze_header {
            xml.push('>');
            xml.push_str(
                r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#,
            );
            xml.push_str(r#"<selection pane="bottomLeft" activeCell="A2" sqref="A2"/>"#);
            xml.push_str("</sheetView>");
        } else {
            xml.push_str("/>");
        }
        xml.push_str("</sheetViews>");
    }

    fn write_cols(&self, xml: &mut String) {
        if self.columns.is_empty() {
            return;
        }
        xml.push_str("<cols>");
        for (i, col) in self.columns.iter().enumerate() {
            xml.push_str(&format!(
                r#"<col min="{n}" max="{n}" width="{w}" customWidth="1"/>"#,
                n = i + 1,
                w = format_width(col.width)
            ));
        }
        xml.push_str("</cols>");
    }

    fn write_header_row(&self, xml: &mut String, strings: &SharedStrings) -> XlsxResult<()> {
        xml.push_str(r#"<row r="1">"#);
        for (c, col) in self.columns.iter().enumerate() {
            xml.push_str(&format!(
                r#"<c r="{}" s="{}" t="s"><v>{}</v></c>"#,
                cell_ref(c, 1),
                CellStyle::Header.index(),
                strings.index_of(&col.header)?
            ));
        }
        xml.push_str("</row>");
        Ok(())
    }

    fn write_data_row(
        &self,
        xml: &mut String,
        strings: &SharedStrings,
        index: usize,
        row: &[FormattedCell],
    ) -> XlsxResult<()> {
        let r = index + 2;
        xml.push_str(&format!(r#"<row r="{}">"#, r));
        for (c, cell) in row.iter().enumerate() {
            let reference = cell_ref(c, r);
            let style = CellStyle::for_data(cell.number_format_id, index).index();
            if cell.is_empty() {
                xml.push_str(&format!(r#"<c r="{}" s="{}"/>"#, reference, style));
                continue;
            }
            match cell.kind {
                CellKind::String => xml.push_str(&format!(
                    r#"<c r="{}" s="{}" t="s"><v>{}</v></c>"#,
                    reference,
                    style,
                    strings.index_of(&cell.text)?
                )),
                CellKind::Boolean => xml.push_str(&format!(
                    r#"<c r="{}" s="{}" t="b"><v>{}</v></c>"#,
                    reference, style, cell.text
                )),
                CellKind::Number | CellKind::Date => xml.push_str(&format!(
                    r#"<c r="{}" s="{}"><v>{}</v></c>"#,
                    reference, style, cell.text
                )),
            }
        }
        xml.push_str("</row>");
        Ok(())
    }

    fn write_totals_row(&self, xml: &mut String, strings: &SharedStrings) -> XlsxResult<()> {
        let r = self.last_data_row() + 1;
        xml.push_str(&format!(r#"<row r="{}">"#, r));
        for (c, col) in self.columns.iter().enumerate() {
            let reference = cell_ref(c, r);
            if col.totaled {
                let style = CellStyle::for_total(col.data_type).index();
                if self.rows.is_empty() {
                    xml.push_str(&format!(r#"<c r="{}" s="{}"><v>0</v></c>"#, reference, style));
                } else {
                    let letters = column_letters(c);
                    xml.push_str(&format!(
                        r#"<c r="{}" s="{}"><f>SUM({l}2:{l}{})</f><v>{}</v></c>"#,
                        reference,
                        style,
                        self.last_data_row(),
                        report_model::format::number_text(self.column_sum(c)),
                        l = letters
                    ));
                }
            } else if c == 0 {
                xml.push_str(&format!(
                    r#"<c r="{}" s="{}" t="s"><v>{}</v></c>"#,
                    reference,
                    CellStyle::Total.index(),
                    strings.index_of(TOTAL_LABEL)?
                ));
            } else {
                xml.push_str(&format!(r#"<c r="{}" s="{}"/>"#, reference, CellStyle::Total.index()));
            }
        }
        xml.push_str("</row>");
        Ok(())
    }

    /// Sum of the numeric cells in a column, cached beside the formula
    fn column_sum(&self, column: usize) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| cell.kind == CellKind::Number)
            .filter_map(|cell| cell.text.parse::<f64>().ok())
            .sum()
    }
}

/// clamp(chars + padding, 8, 60)
fn auto_width(chars: usize) -> f64 {
    (chars as f64 + AUTO_WIDTH_PADDING).clamp(MIN_AUTO_WIDTH, MAX_AUTO_WIDTH)
}

fn format_width(width: f64) -> String {
    let s = format!("{:.2}", width);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
