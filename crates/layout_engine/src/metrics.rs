//! Font metrics and text fitting
//!
//! Text width is approximated with a fixed advance per character, so every
//! measurement is a character count times [`FontMetrics::char_width`].

use std::borrow::Cow;

/// Character appended to truncated text
pub const ELLIPSIS: char = '\u{2026}';

/// Metrics of the body font used for table cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Font size in points
    pub font_size: f64,
    /// Baseline-to-baseline distance in points
    pub line_height: f64,
    /// Padding inside each cell, applied on every side
    pub cell_padding: f64,
    /// Average character advance as a fraction of the font size
    pub char_width_ratio: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            line_height: 12.0,
            cell_padding: 4.0,
            char_width_ratio: 0.5,
        }
    }
}

impl FontMetrics {
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_cell_padding(mut self, cell_padding: f64) -> Self {
        self.cell_padding = cell_padding;
        self
    }

    /// Advance of one character in points
    pub fn char_width(&self) -> f64 {
        self.font_size * self.char_width_ratio
    }

    /// Height of a single-line table row
    pub fn row_height(&self) -> f64 {
        self.line_height + 2.0 * self.cell_padding
    }

    /// Approximate rendered width of text
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width()
    }

    /// Column width in points for a width given in characters
    pub fn column_width_for_chars(&self, chars: f64) -> f64 {
        chars * self.char_width() + 2.0 * self.cell_padding
    }

    /// Number of characters that fit in a column of the given width
    pub fn chars_for_width(&self, width: f64) -> usize {
        let inner = width - 2.0 * self.cell_padding;
        let char_width = self.char_width();
        if inner <= 0.0 || char_width <= 0.0 {
            return 0;
        }
        (inner / char_width).floor() as usize
    }
}

/// Truncate text to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut
pub fn fit_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    let count = text.chars().count();
    if count <= max_chars {
        return Cow::Borrowed(text);
    }
    if max_chars == 0 {
        return Cow::Borrowed("");
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let m = FontMetrics::default();
        assert_eq!(m.char_width(), 4.5);
        assert_eq!(m.row_height(), 20.0);
        assert_eq!(m.text_width("abcd"), 18.0);
        assert_eq!(m.column_width_for_chars(10.0), 53.0);
        assert_eq!(m.chars_for_width(53.0), 10);
        assert_eq!(m.chars_for_width(5.0), 0);
    }

    #[test]
    fn test_fit_text() {
        assert_eq!(fit_text("short", 10), "short");
        assert_eq!(fit_text("exactly", 7), "exactly");
        assert_eq!(fit_text("truncated text", 6), "trunc\u{2026}");
        assert_eq!(fit_text("abc", 1), "\u{2026}");
        assert_eq!(fit_text("abc", 0), "");
    }

    #[test]
    fn test_fit_text_counts_chars_not_bytes() {
        assert_eq!(fit_text("héllo", 5), "héllo");
        assert_eq!(fit_text("naïveté", 4), "naï\u{2026}");
    }
}
