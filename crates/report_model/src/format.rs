//! Value formatting
//!
//! Converts a raw [`CellValue`] and a declared [`DataType`] into a
//! [`FormattedCell`], the intermediate both document builders consume.
//! Formatting never fails: values that cannot be interpreted as the declared
//! type degrade to their raw text with [`CellKind::String`].

use crate::column::{DataType, ExportColumn};
use crate::record::Record;
use crate::value::CellValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Number format ids referenced from spreadsheet styles
pub mod number_formats {
    /// Builtin `General`
    pub const GENERAL: u32 = 0;
    /// Builtin `0.00%`
    pub const PERCENT: u32 = 10;
    /// Custom `"$"#,##0.00`
    pub const CURRENCY: u32 = 164;
    /// Custom `mm/dd/yyyy`
    pub const DATE: u32 = 165;
    /// Custom `mm/dd/yyyy hh:mm`
    pub const DATETIME: u32 = 166;

    pub const CURRENCY_CODE: &str = "\"$\"#,##0.00";
    pub const DATE_CODE: &str = "mm/dd/yyyy";
    pub const DATETIME_CODE: &str = "mm/dd/yyyy hh:mm";
}

/// Kind tag of a formatted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    String,
    Number,
    Date,
    Boolean,
}

/// Which output a cell is formatted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTarget {
    /// XLSX: numbers and date serials stay numeric, styles carry the format
    Spreadsheet,
    /// PDF: everything becomes display text
    Document,
}

/// A formatted cell value
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCell {
    pub text: String,
    pub kind: CellKind,
    pub number_format_id: Option<u32>,
}

impl FormattedCell {
    pub fn string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CellKind::String,
            number_format_id: None,
        }
    }

    pub fn empty() -> Self {
        Self::string("")
    }

    fn new(text: String, kind: CellKind, number_format_id: Option<u32>) -> Self {
        Self {
            text,
            kind,
            number_format_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Format one cell of a row, honoring the column's custom formatter
pub fn format_cell<R: Record>(
    column: &ExportColumn<R>,
    row: &R,
    target: OutputTarget,
) -> FormattedCell {
    let value = column.value_of(row);
    match &column.formatter {
        Some(formatter) => FormattedCell::string(formatter(&value, row)),
        None => format_value(&value, column.data_type, target),
    }
}

/// Format a raw value according to its declared type
pub fn format_value(value: &CellValue, data_type: DataType, target: OutputTarget) -> FormattedCell {
    if value.is_null() {
        return FormattedCell::empty();
    }
    match data_type {
        DataType::String => format_string(value),
        DataType::Number => format_number(value),
        DataType::Currency => format_currency(value, target),
        DataType::Percentage => format_percentage(value, target),
        DataType::Date => format_date(value, target, false),
        DataType::DateTime => format_date(value, target, true),
        DataType::Boolean => format_boolean(value, target),
    }
}

fn degrade(value: &CellValue, data_type: DataType) -> FormattedCell {
    tracing::trace!("value {:?} is not a valid {}, keeping raw text", value, data_type);
    FormattedCell::string(value.to_raw_string())
}

fn format_string(value: &CellValue) -> FormattedCell {
    FormattedCell::string(value.to_raw_string())
}

fn format_number(value: &CellValue) -> FormattedCell {
    match value.as_f64() {
        Some(n) => FormattedCell::new(number_text(n), CellKind::Number, None),
        None => degrade(value, DataType::Number),
    }
}

fn format_currency(value: &CellValue, target: OutputTarget) -> FormattedCell {
    let Some(n) = value.as_f64() else {
        return degrade(value, DataType::Currency);
    };
    let text = match target {
        OutputTarget::Spreadsheet => number_text(n),
        OutputTarget::Document => currency_text(n),
    };
    FormattedCell::new(text, CellKind::Number, Some(number_formats::CURRENCY))
}

fn format_percentage(value: &CellValue, target: OutputTarget) -> FormattedCell {
    let Some(n) = value.as_f64() else {
        return degrade(value, DataType::Percentage);
    };
    let text = match target {
        OutputTarget::Spreadsheet => number_text(n),
        OutputTarget::Document => percentage_text(n),
    };
    FormattedCell::new(text, CellKind::Number, Some(number_formats::PERCENT))
}

fn format_date(value: &CellValue, target: OutputTarget, with_time: bool) -> FormattedCell {
    let data_type = if with_time {
        DataType::DateTime
    } else {
        DataType::Date
    };
    let Some(dt) = to_datetime(value) else {
        return degrade(value, data_type);
    };

    let format_id = if with_time {
        number_formats::DATETIME
    } else {
        number_formats::DATE
    };
    let text = match (target, with_time) {
        (OutputTarget::Spreadsheet, false) => number_text(excel_serial_date(dt.date())),
        (OutputTarget::Spreadsheet, true) => number_text(excel_serial_datetime(dt)),
        (OutputTarget::Document, false) => dt.format("%m/%d/%Y").to_string(),
        (OutputTarget::Document, true) => dt.format("%m/%d/%Y %H:%M").to_string(),
    };
    FormattedCell::new(text, CellKind::Date, Some(format_id))
}

fn format_boolean(value: &CellValue, target: OutputTarget) -> FormattedCell {
    let Some(b) = to_bool(value) else {
        return degrade(value, DataType::Boolean);
    };
    match target {
        OutputTarget::Spreadsheet => {
            FormattedCell::new(if b { "1" } else { "0" }.to_string(), CellKind::Boolean, None)
        }
        OutputTarget::Document => FormattedCell::string(if b { "Yes" } else { "No" }),
    }
}

/// Interpret a value as a boolean
pub fn to_bool(value: &CellValue) -> Option<bool> {
    match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) if n.is_finite() => Some(*n != 0.0),
        CellValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret a value as a date-time
///
/// Numbers are read as milliseconds since the Unix epoch.
pub fn to_datetime(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        CellValue::Text(s) => parse_datetime(s),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse the textual date and date-time forms accepted in rows
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Spreadsheet day serial of a date (1899-12-31 is day 1)
pub fn excel_serial_date(date: NaiveDate) -> f64 {
    (date - excel_epoch()).num_days() as f64
}

/// Spreadsheet serial of a date-time, with the time of day as a fraction
pub fn excel_serial_datetime(dt: NaiveDateTime) -> f64 {
    let days = excel_serial_date(dt.date());
    let seconds = (dt - dt.date().and_time(NaiveTime::MIN)).num_seconds() as f64;
    days + seconds / 86_400.0
}

/// Locale-free number text
pub fn number_text(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    n.to_string()
}

/// `$1,234.50` style text, with a leading minus for negatives
pub fn currency_text(n: f64) -> String {
    let cents = (n.abs() * 100.0).round() as u64;
    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Fraction rendered as a percentage with two decimals (`0.1234` -> `12.34%`)
pub fn percentage_text(fraction: f64) -> String {
    let pct = fraction * 100.0;
    let pct = if pct.abs() < 0.005 { 0.0 } else { pct };
    format!("{:.2}%", pct)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
