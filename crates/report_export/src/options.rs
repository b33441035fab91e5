//! Export Options
//!
//! This module defines configuration shared by the spreadsheet and
//! document exports.

use layout_engine::{FontMetrics, Margins, Orientation, PageSetup, PageSize};
use report_model::TableFlags;
use serde::{Deserialize, Serialize};

/// Options for an export request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Line rendered under the title in documents
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Preferred output file name (slugged)
    #[serde(default)]
    pub filename: Option<String>,
    /// Author recorded in document properties
    #[serde(default)]
    pub author: Option<String>,
    /// Color palette
    #[serde(default)]
    pub styling: Styling,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub margins: Margins,
    /// Body font size in points for documents
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Add an auto-filter over the header row
    #[serde(default = "default_true")]
    pub auto_filter: bool,
    /// Freeze the header row
    #[serde(default = "default_true")]
    pub freeze_header: bool,
    /// Append a totals row
    #[serde(default)]
    pub include_totals: bool,
    /// Render the summary block
    #[serde(default)]
    pub include_summary: bool,
    /// Summary label/value pairs
    #[serde(default)]
    pub summary_data: Vec<SummaryItem>,
    /// Diagonal watermark text
    #[serde(default)]
    pub watermark: Option<String>,
    #[serde(default = "default_true")]
    pub include_page_numbers: bool,
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f64 {
    9.0
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            filename: None,
            author: None,
            styling: Styling::default(),
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            font_size: default_font_size(),
            auto_filter: true,
            freeze_header: true,
            include_totals: false,
            include_summary: false,
            summary_data: Vec::new(),
            watermark: None,
            include_page_numbers: true,
            include_timestamp: true,
        }
    }
}

impl ExportOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_auto_filter(mut self, enabled: bool) -> Self {
        self.auto_filter = enabled;
        self
    }

    pub fn with_freeze_header(mut self, enabled: bool) -> Self {
        self.freeze_header = enabled;
        self
    }

    pub fn with_totals(mut self, enabled: bool) -> Self {
        self.include_totals = enabled;
        self
    }

    /// Enable the summary block with the given items
    pub fn with_summary(mut self, items: Vec<SummaryItem>) -> Self {
        self.include_summary = true;
        self.summary_data = items;
        self
    }

    pub fn with_watermark(mut self, text: impl Into<String>) -> Self {
        self.watermark = Some(text.into());
        self
    }

    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.include_page_numbers = enabled;
        self
    }

    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.include_timestamp = enabled;
        self
    }

    /// Table flags used when a table does not override them
    pub fn table_defaults(&self) -> TableFlags {
        TableFlags {
            auto_filter: self.auto_filter,
            freeze_header: self.freeze_header,
            include_totals: self.include_totals,
        }
    }

    pub fn page_setup(&self) -> PageSetup {
        PageSetup::new(self.page_size, self.orientation, self.margins)
    }

    pub fn font_metrics(&self) -> FontMetrics {
        let metrics = FontMetrics::default();
        if self.font_size.is_finite() && self.font_size > 0.0 {
            // Keep the default proportions: 12pt lines for a 9pt font
            metrics
                .with_font_size(self.font_size)
                .with_line_height(self.font_size * 4.0 / 3.0)
        } else {
            metrics
        }
    }

    /// Summary items to render, empty when the summary is disabled
    pub fn summary_items(&self) -> &[SummaryItem] {
        if self.include_summary {
            &self.summary_data
        } else {
            &[]
        }
    }

    /// Whether the footer band is drawn
    pub fn has_footer(&self) -> bool {
        self.include_page_numbers || self.include_timestamp
    }
}

/// Hex color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Styling {
    pub header_background: String,
    pub header_text: String,
    pub alternate_row: String,
    pub border: String,
    pub text: String,
    pub title: String,
    pub watermark: String,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            header_background: "#1F4E79".to_string(),
            header_text: "#FFFFFF".to_string(),
            alternate_row: "#F2F2F2".to_string(),
            border: "#BFBFBF".to_string(),
            text: "#000000".to_string(),
            title: "#1F4E79".to_string(),
            watermark: "#D9D9D9".to_string(),
        }
    }
}

/// A label/value pair in the summary block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

impl SummaryItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert_eq!(options.margins, Margins::uniform(72.0));
        assert!(!options.include_totals);
        assert!(options.include_timestamp);
        assert!(options.include_page_numbers);
        assert!(options.auto_filter);
        assert!(options.freeze_header);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ExportOptions = serde_json::from_str(
            r##"{"title":"Sales","pageSize":"a4","orientation":"landscape","includeTotals":true,
                "styling":{"headerBackground":"#000000"}}"##,
        )
        .unwrap();
        assert_eq!(options.title.as_deref(), Some("Sales"));
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.orientation, Orientation::Landscape);
        assert!(options.include_totals);
        assert_eq!(options.styling.header_background, "#000000");
        assert_eq!(options.styling.header_text, "#FFFFFF");
        assert!(options.include_page_numbers);
        assert_eq!(options.font_size, 9.0);
    }

    #[test]
    fn test_font_metrics_scale() {
        let metrics = ExportOptions::new().with_font_size(12.0).font_metrics();
        assert_eq!(metrics.font_size, 12.0);
        assert_eq!(metrics.line_height, 16.0);
        assert_eq!(ExportOptions::new().font_metrics(), FontMetrics::default());
    }

    #[test]
    fn test_summary_items_gated() {
        let mut options = ExportOptions::new().with_summary(vec![SummaryItem::new("Rows", "2")]);
        assert_eq!(options.summary_items().len(), 1);
        options.include_summary = false;
        assert!(options.summary_items().is_empty());
    }
}
