//! Table Layout
//!
//! Computes the geometry shared by every page of a paginated table: column
//! widths and x-offsets, header and row heights, and the number of data rows
//! that fit between the header band and the bottom reservation.
//!
//! Column widths are declared in characters. Declared widths are honored
//! first; columns without one share whatever horizontal space remains
//! equally. When the declared widths alone overflow the content area they
//! are scaled down proportionally.

use crate::{FontMetrics, LayoutError, PageSetup, Result};

/// Height of the title line
pub const TITLE_HEIGHT: f64 = 24.0;
/// Height of the subtitle line
pub const SUBTITLE_HEIGHT: f64 = 16.0;
/// Height of one summary line
pub const SUMMARY_LINE_HEIGHT: f64 = 14.0;
/// Gap below the title and summary blocks
pub const BLOCK_GAP: f64 = 10.0;
/// Height of the footer band
pub const FOOTER_HEIGHT: f64 = 20.0;

/// Width request for one column
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSpec {
    /// Declared width in characters
    pub width_chars: Option<f64>,
}

impl ColumnSpec {
    pub fn auto() -> Self {
        Self { width_chars: None }
    }

    pub fn fixed(chars: f64) -> Self {
        Self {
            width_chars: Some(chars),
        }
    }
}

/// Vertical space reserved above and below the table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reservations {
    /// Space for the title, subtitle, and summary blocks
    pub top: f64,
    /// Space for the footer
    pub bottom: f64,
}

impl Reservations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, has_subtitle: bool) -> Self {
        self.top += TITLE_HEIGHT + BLOCK_GAP;
        if has_subtitle {
            self.top += SUBTITLE_HEIGHT;
        }
        self
    }

    /// Reserve a two-column summary block for `items` label/value pairs
    pub fn with_summary(mut self, items: usize) -> Self {
        if items > 0 {
            self.top += items.div_ceil(2) as f64 * SUMMARY_LINE_HEIGHT + BLOCK_GAP;
        }
        self
    }

    pub fn with_footer(mut self) -> Self {
        self.bottom += FOOTER_HEIGHT;
        self
    }
}

/// Computed geometry of a single column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    /// Width in points
    pub width: f64,
    /// Absolute x position of the column's left edge
    pub x_offset: f64,
    /// Characters that fit inside the column's padding
    pub max_chars: usize,
}

/// Table geometry, computed once and applied to every page
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub columns: Vec<ColumnGeometry>,
    pub row_height: f64,
    pub header_height: f64,
    pub rows_per_page: usize,
    /// Left edge of the table
    pub start_x: f64,
    /// Top edge of the header band
    pub start_y: f64,
    /// Sum of all column widths
    pub table_width: f64,
    /// Vertical space available to header plus rows
    pub available_height: f64,
}

impl TableLayout {
    /// Compute the layout for the given page, font, columns, and reservations
    pub fn compute(
        setup: &PageSetup,
        metrics: &FontMetrics,
        columns: &[ColumnSpec],
        reservations: Reservations,
    ) -> Result<Self> {
        setup.validate()?;
        if columns.is_empty() {
            return Err(LayoutError::NoColumns);
        }

        let row_height = metrics.row_height();
        let header_height = row_height;
        if row_height <= 0.0 || !row_height.is_finite() {
            return Err(LayoutError::InvalidPageSetup(format!(
                "row height {} must be positive",
                row_height
            )));
        }

        let available_height = setup.content_height() - reservations.top - reservations.bottom;
        let fit = ((available_height - header_height) / row_height).floor();
        if !fit.is_finite() || fit < 1.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "no data row fits in {:.1}pt of vertical space",
                available_height
            )));
        }
        let rows_per_page = fit as usize;

        let widths = distribute_widths(setup.content_width(), metrics, columns);
        let start_x = setup.margins.left;
        let mut x = start_x;
        let geometry: Vec<ColumnGeometry> = widths
            .iter()
            .map(|&width| {
                let col = ColumnGeometry {
                    width,
                    x_offset: x,
                    max_chars: metrics.chars_for_width(width),
                };
                x += width;
                col
            })
            .collect();

        Ok(Self {
            table_width: widths.iter().sum(),
            columns: geometry,
            row_height,
            header_height,
            rows_per_page,
            start_x,
            start_y: setup.height() - setup.margins.top - reservations.top,
            available_height,
        })
    }

    /// Top edge of the data row at `slot` on a page (0-based)
    pub fn row_top(&self, slot: usize) -> f64 {
        self.start_y - self.header_height - slot as f64 * self.row_height
    }

    /// Bottom edge of a table with `rows` data rows
    pub fn table_bottom(&self, rows: usize) -> f64 {
        self.row_top(rows)
    }
}

/// Distribute the content width across columns, in points
fn distribute_widths(available: f64, metrics: &FontMetrics, columns: &[ColumnSpec]) -> Vec<f64> {
    let min_width = metrics.column_width_for_chars(1.0);

    let mut widths = vec![0.0_f64; columns.len()];
    let mut fixed_width = 0.0_f64;
    let mut auto_columns = Vec::new();

    // First pass: declared widths
    for (i, col) in columns.iter().enumerate() {
        match col.width_chars.filter(|w| w.is_finite() && *w > 0.0) {
            Some(chars) => {
                widths[i] = metrics.column_width_for_chars(chars);
                fixed_width += widths[i];
            }
            None => auto_columns.push(i),
        }
    }

    // Scale declared widths down if they leave no room
    let reserve = (auto_columns.len() as f64 * min_width).min(available);
    let room = (available - reserve).max(0.0);
    if fixed_width > room && fixed_width > 0.0 {
        let scale = room / fixed_width;
        for (i, col) in columns.iter().enumerate() {
            if col.width_chars.is_some() && !auto_columns.contains(&i) {
                widths[i] *= scale;
            }
        }
        fixed_width = room;
    }

    // Remaining width is shared equally
    if !auto_columns.is_empty() {
        let per_col = (available - fixed_width).max(0.0) / auto_columns.len() as f64;
        for &i in &auto_columns {
            widths[i] = per_col;
        }
    }

    widths
}
