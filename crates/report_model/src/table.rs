//! Table grouping
//!
//! An [`ExportTable`] is one sheet of a spreadsheet export, or the table
//! rendered into a document. Per-table flags override request defaults.

use crate::column::ExportColumn;

/// Resolved per-table presentation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFlags {
    pub auto_filter: bool,
    pub freeze_header: bool,
    pub include_totals: bool,
}

impl Default for TableFlags {
    fn default() -> Self {
        Self {
            auto_filter: true,
            freeze_header: true,
            include_totals: false,
        }
    }
}

/// A named table of typed columns and rows
pub struct ExportTable<R> {
    /// Sheet name (sanitized when written)
    pub name: String,
    /// Ordered columns, hidden ones included
    pub columns: Vec<ExportColumn<R>>,
    /// Row data; `None` means the caller supplied no data at all
    pub rows: Option<Vec<R>>,
    pub auto_filter: Option<bool>,
    pub freeze_header: Option<bool>,
    pub include_totals: Option<bool>,
}

impl<R> ExportTable<R> {
    pub fn new(name: impl Into<String>, columns: Vec<ExportColumn<R>>, rows: Vec<R>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Some(rows),
            auto_filter: None,
            freeze_header: None,
            include_totals: None,
        }
    }

    pub fn with_auto_filter(mut self, enabled: bool) -> Self {
        self.auto_filter = Some(enabled);
        self
    }

    pub fn with_freeze_header(mut self, enabled: bool) -> Self {
        self.freeze_header = Some(enabled);
        self
    }

    pub fn with_totals(mut self, enabled: bool) -> Self {
        self.include_totals = Some(enabled);
        self
    }

    /// Resolve the table's flags against request-level defaults
    pub fn flags(&self, defaults: TableFlags) -> TableFlags {
        TableFlags {
            auto_filter: self.auto_filter.unwrap_or(defaults.auto_filter),
            freeze_header: self.freeze_header.unwrap_or(defaults.freeze_header),
            include_totals: self.include_totals.unwrap_or(defaults.include_totals),
        }
    }

    /// Columns that are exported, in declaration order
    pub fn visible_columns(&self) -> Vec<&ExportColumn<R>> {
        self.columns.iter().filter(|c| !c.hidden).collect()
    }

    /// Row data, empty when none was supplied
    pub fn row_slice(&self) -> &[R] {
        self.rows.as_deref().unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.row_slice().len()
    }
}

impl<R: Clone> Clone for ExportTable<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            auto_filter: self.auto_filter,
            freeze_header: self.freeze_header,
            include_totals: self.include_totals,
        }
    }
}

impl<R> std::fmt::Debug for ExportTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportTable")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("rows", &self.rows.as_ref().map(Vec::len))
            .field("auto_filter", &self.auto_filter)
            .field("freeze_header", &self.freeze_header)
            .field("include_totals", &self.include_totals)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample() -> ExportTable<Value> {
        ExportTable::new(
            "Orders",
            vec![
                ExportColumn::field("Id", "id"),
                ExportColumn::field("Secret", "secret").hidden(),
                ExportColumn::field("Name", "name"),
            ],
            vec![json!({"id": 1}), json!({"id": 2})],
        )
    }

    #[test]
    fn test_visible_columns_skip_hidden() {
        let table = sample();
        let headers: Vec<_> = table.visible_columns().iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Id", "Name"]);
    }

    #[test]
    fn test_flags_override_defaults() {
        let table = sample().with_totals(true).with_auto_filter(false);
        let flags = table.flags(TableFlags::default());
        assert!(flags.include_totals);
        assert!(!flags.auto_filter);
        assert!(flags.freeze_header);
    }

    #[test]
    fn test_missing_rows() {
        let mut table = sample();
        table.rows = None;
        assert_eq!(table.row_count(), 0);
        assert!(table.row_slice().is_empty());
    }
}
