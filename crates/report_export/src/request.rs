//! Export requests
//!
//! An [`ExportRequest`] pairs options with either a single table or a list
//! of sheets. [`ExportRequestDocument`] is its JSON form, where every column
//! reads a named field from JSON rows.

use crate::error::Result;
use crate::options::ExportOptions;
use report_model::{Alignment, DataType, ExportColumn, ExportTable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything needed to run one export
pub struct ExportRequest<R> {
    pub options: ExportOptions,
    /// The single table (`columns` + `data`)
    pub table: Option<ExportTable<R>>,
    /// Sheets of a multi-sheet spreadsheet export
    pub sheets: Vec<ExportTable<R>>,
}

impl<R> ExportRequest<R> {
    /// A single-table request
    pub fn new(columns: Vec<ExportColumn<R>>, rows: Vec<R>) -> Self {
        Self {
            options: ExportOptions::default(),
            table: Some(ExportTable::new("", columns, rows)),
            sheets: Vec::new(),
        }
    }

    /// A multi-sheet request
    pub fn with_sheets(sheets: Vec<ExportTable<R>>) -> Self {
        Self {
            options: ExportOptions::default(),
            table: None,
            sheets,
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_multi_sheet(&self) -> bool {
        !self.sheets.is_empty()
    }

    /// Tables written to a spreadsheet: the sheets, or the single table
    pub fn spreadsheet_tables(&self) -> Vec<&ExportTable<R>> {
        if self.is_multi_sheet() {
            self.sheets.iter().collect()
        } else {
            self.table.iter().collect()
        }
    }

    /// Table rendered into a document: the single table, else the first sheet
    pub fn primary_table(&self) -> Option<&ExportTable<R>> {
        self.table.as_ref().or_else(|| self.sheets.first())
    }
}

impl<R> std::fmt::Debug for ExportRequest<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportRequest")
            .field("options", &self.options)
            .field("table", &self.table)
            .field("sheets", &self.sheets)
            .finish()
    }
}

/// JSON description of an export request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequestDocument {
    #[serde(flatten)]
    pub options: ExportOptions,
    #[serde(default)]
    pub columns: Vec<ColumnDocument>,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub sheets: Vec<SheetDocument>,
}

/// JSON description of a column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDocument {
    pub header: String,
    /// Field name, dotted paths allowed
    #[serde(alias = "accessor")]
    pub field: String,
    #[serde(default, rename = "type", alias = "dataType")]
    pub data_type: DataType,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub align: Option<Alignment>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub include_in_totals: bool,
}

impl ColumnDocument {
    fn into_column(self) -> ExportColumn<Value> {
        let mut column = ExportColumn::field(self.header, self.field).with_type(self.data_type);
        column.width = self.width;
        column.align = self.align;
        column.hidden = self.hidden;
        column.include_in_totals = self.include_in_totals;
        column
    }
}

/// JSON description of a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDocument>,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub auto_filter: Option<bool>,
    #[serde(default)]
    pub freeze_header: Option<bool>,
    #[serde(default)]
    pub include_totals: Option<bool>,
}

impl SheetDocument {
    fn into_table(self) -> ExportTable<Value> {
        ExportTable {
            name: self.name,
            columns: self.columns.into_iter().map(ColumnDocument::into_column).collect(),
            rows: self.data,
            auto_filter: self.auto_filter,
            freeze_header: self.freeze_header,
            include_totals: self.include_totals,
        }
    }
}

impl ExportRequestDocument {
    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a request over JSON rows
    pub fn into_request(self) -> ExportRequest<Value> {
        let table = if self.columns.is_empty() && self.data.is_none() {
            None
        } else {
            Some(ExportTable {
                name: String::new(),
                columns: self.columns.into_iter().map(ColumnDocument::into_column).collect(),
                rows: self.data,
                auto_filter: None,
                freeze_header: None,
                include_totals: None,
            })
        };
        ExportRequest {
            options: self.options,
            table,
            sheets: self.sheets.into_iter().map(SheetDocument::into_table).collect(),
        }
    }
}
