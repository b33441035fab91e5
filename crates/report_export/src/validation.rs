//! Request validation
//!
//! Validation is pure: it inspects the request and reports every issue found
//! without generating anything.

use crate::request::ExportRequest;
use crate::xlsx::MAX_SHEET_NAME_LEN;
use report_model::ExportTable;
use serde::Serialize;
use std::fmt;

/// Outcome of validating a request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            f.write_str("no issues")
        } else {
            f.write_str(&self.errors.join("; "))
        }
    }
}

/// Check a request without generating output
pub fn validate_request<R>(request: &ExportRequest<R>) -> ValidationReport {
    let mut errors = Vec::new();

    if request.is_multi_sheet() {
        for (i, sheet) in request.sheets.iter().enumerate() {
            let label = if sheet.name.trim().is_empty() {
                format!("Sheet {}", i + 1)
            } else {
                format!("Sheet '{}'", sheet.name)
            };
            if sheet.name.chars().count() > MAX_SHEET_NAME_LEN {
                errors.push(format!(
                    "{} name exceeds {} characters",
                    label, MAX_SHEET_NAME_LEN
                ));
            }
            check_table(sheet, &label, &mut errors);
        }
    } else {
        match &request.table {
            Some(table) => check_table(table, "Table", &mut errors),
            None => {
                errors.push("At least one column is required".to_string());
                errors.push("Data is required".to_string());
            }
        }
    }

    if !errors.is_empty() {
        tracing::debug!("export request rejected: {}", errors.join("; "));
    }
    ValidationReport::from_errors(errors)
}

fn check_table<R>(table: &ExportTable<R>, label: &str, errors: &mut Vec<String>) {
    if table.columns.is_empty() {
        errors.push(format!("{} has no columns", label));
    } else if table.visible_columns().is_empty() {
        errors.push(format!("{} has no visible columns", label));
    }
    if table.rows.is_none() {
        errors.push(format!("{} has no data", label));
    }
}
