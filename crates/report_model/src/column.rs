//! Column definitions
//!
//! An [`ExportColumn`] describes how one column of a report is extracted from
//! a row, which data type drives its formatting, and how it is laid out.

use crate::error::{ModelError, Result};
use crate::record::Record;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Declared data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Plain text
    #[default]
    String,
    /// Plain number
    Number,
    /// Monetary amount
    Currency,
    /// Fraction displayed as a percentage (0.25 = 25%)
    Percentage,
    /// Calendar date
    Date,
    /// Date with time of day
    #[serde(rename = "datetime")]
    DateTime,
    /// True/false
    Boolean,
}

impl DataType {
    /// All data types, in declaration order
    pub const ALL: [DataType; 7] = [
        DataType::String,
        DataType::Number,
        DataType::Currency,
        DataType::Percentage,
        DataType::Date,
        DataType::DateTime,
        DataType::Boolean,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Currency => "currency",
            DataType::Percentage => "percentage",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Boolean => "boolean",
        }
    }

    /// Whether values of this type can be summed in a totals row
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Number | DataType::Currency | DataType::Percentage
        )
    }

    /// Alignment used when a column does not declare one
    pub fn default_alignment(&self) -> Alignment {
        match self {
            DataType::Number | DataType::Currency | DataType::Percentage => Alignment::Right,
            DataType::Boolean => Alignment::Center,
            DataType::String | DataType::Date | DataType::DateTime => Alignment::Left,
        }
    }
}

impl FromStr for DataType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(DataType::String),
            "number" | "numeric" => Ok(DataType::Number),
            "currency" | "money" => Ok(DataType::Currency),
            "percentage" | "percent" => Ok(DataType::Percentage),
            "date" => Ok(DataType::Date),
            "datetime" | "date_time" | "timestamp" => Ok(DataType::DateTime),
            "boolean" | "bool" => Ok(DataType::Boolean),
            other => Err(ModelError::UnknownDataType(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal alignment of cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" | "end" => Ok(Alignment::Right),
            other => Err(ModelError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Computed accessor: derives a cell value from a row
pub type ValueFn<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Custom formatter: replaces the type-driven formatting pipeline
pub type FormatFn<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// How a column reads its value from a row
pub enum Accessor<R> {
    /// Look the value up by field name through [`Record::field`]
    Field(String),
    /// Compute the value from the row
    Computed(ValueFn<R>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Computed(f) => Accessor::Computed(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A column of an exported table
pub struct ExportColumn<R> {
    /// Header text
    pub header: String,
    /// Value accessor
    pub accessor: Accessor<R>,
    /// Declared data type
    pub data_type: DataType,
    /// Preferred width in character units
    pub width: Option<f64>,
    /// Explicit alignment (defaults by data type)
    pub align: Option<Alignment>,
    /// Hidden columns are not exported
    pub hidden: bool,
    /// Whether the column is summed in a totals row
    pub include_in_totals: bool,
    /// Custom formatter
    pub formatter: Option<FormatFn<R>>,
}

impl<R> ExportColumn<R> {
    /// Create a column that reads a named field
    pub fn field(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_accessor(header, Accessor::Field(field.into()))
    }

    /// Create a column that computes its value from the row
    pub fn computed(
        header: impl Into<String>,
        f: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self::with_accessor(header, Accessor::Computed(Arc::new(f)))
    }

    fn with_accessor(header: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self {
            header: header.into(),
            accessor,
            data_type: DataType::String,
            width: None,
            align: None,
            hidden: false,
            include_in_totals: false,
            formatter: None,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_totals(mut self) -> Self {
        self.include_in_totals = true;
        self
    }

    /// Set a custom formatter
    pub fn with_formatter(
        mut self,
        f: impl Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Effective alignment
    pub fn alignment(&self) -> Alignment {
        self.align
            .unwrap_or_else(|| self.data_type.default_alignment())
    }

    /// Whether a totals row sums this column
    ///
    /// Only numeric columns are summed; the flag is ignored on other types.
    pub fn is_totaled(&self) -> bool {
        self.include_in_totals && self.data_type.is_numeric()
    }

    /// Declared width, if it is a usable positive number
    pub fn declared_width(&self) -> Option<f64> {
        self.width.filter(|w| w.is_finite() && *w > 0.0)
    }
}

impl<R: Record> ExportColumn<R> {
    /// Extract the raw value of this column from a row
    pub fn value_of(&self, row: &R) -> CellValue {
        match &self.accessor {
            Accessor::Field(name) => row.field(name),
            Accessor::Computed(f) => f(row),
        }
    }
}

impl<R> Clone for ExportColumn<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            data_type: self.data_type,
            width: self.width,
            align: self.align,
            hidden: self.hidden,
            include_in_totals: self.include_in_totals,
            formatter: self.formatter.clone(),
        }
    }
}

impl<R> fmt::Debug for ExportColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportColumn")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("data_type", &self.data_type)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("hidden", &self.hidden)
            .field("include_in_totals", &self.include_in_totals)
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .finish()
    }
}
