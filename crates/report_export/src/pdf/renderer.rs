//! Table to PDF conversion
//!
//! [`PdfReport`] formats a table for the page, computes the layout once,
//! splits the rows into pages, and then draws every page with the same
//! geometry. Only the first slot index changes from page to page.

use super::content::ContentStream;
use super::document::{
    create_catalog, create_page, create_pages, create_resources, DocumentInfo, MediaBox, ObjectIds,
};
use super::fonts::{create_standard_font_dict, StandardFont};
use super::objects::PdfStream;
use super::writer::{PdfResult, PdfWriter};
use crate::color::RgbColor;
use crate::options::{ExportOptions, Styling, SummaryItem};
use chrono::NaiveDateTime;
use layout_engine::{
    fit_text, paginate, ColumnSpec, FontMetrics, PageRange, PageSetup, Reservations, TableLayout,
    BLOCK_GAP, FOOTER_HEIGHT, SUBTITLE_HEIGHT, SUMMARY_LINE_HEIGHT, TITLE_HEIGHT,
};
use report_model::{
    format_cell, format_value, Alignment, CellValue, ExportTable, OutputTarget, Record,
};

/// Label in the first column of the totals row
const TOTAL_LABEL: &str = "Total";

const TITLE_FONT_SIZE: f64 = 16.0;
const SUBTITLE_FONT_SIZE: f64 = 11.0;
const FOOTER_FONT_SIZE: f64 = 8.0;
const WATERMARK_FONT_SIZE: f64 = 60.0;
const WATERMARK_ANGLE: f64 = 45.0;
const GRID_LINE_WIDTH: f64 = 0.5;
const TOTALS_RULE_WIDTH: f64 = 1.0;

/// Palette resolved from hex styling
#[derive(Debug, Clone, Copy)]
struct Palette {
    header_background: RgbColor,
    header_text: RgbColor,
    alternate_row: RgbColor,
    border: RgbColor,
    text: RgbColor,
    title: RgbColor,
    watermark: RgbColor,
}

impl Palette {
    fn from_styling(styling: &Styling) -> Self {
        Self {
            header_background: RgbColor::from_hex(&styling.header_background),
            header_text: RgbColor::from_hex(&styling.header_text),
            alternate_row: RgbColor::from_hex(&styling.alternate_row),
            border: RgbColor::from_hex(&styling.border),
            text: RgbColor::from_hex(&styling.text),
            title: RgbColor::from_hex(&styling.title),
            watermark: RgbColor::from_hex(&styling.watermark),
        }
    }
}

/// A table laid out and paginated for the document
#[derive(Debug, Clone)]
pub struct PdfReport {
    setup: PageSetup,
    metrics: FontMetrics,
    layout: TableLayout,
    pages: Vec<PageRange>,
    headers: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    totals: Option<Vec<String>>,
    title: Option<String>,
    subtitle: Option<String>,
    author: Option<String>,
    summary: Vec<SummaryItem>,
    watermark: Option<String>,
    page_numbers: bool,
    timestamp: bool,
    palette: Palette,
}

impl PdfReport {
    /// Format the visible cells of `table` and compute its pages
    pub fn prepare<R: Record>(table: &ExportTable<R>, options: &ExportOptions) -> PdfResult<Self> {
        let visible = table.visible_columns();
        let setup = options.page_setup();
        let metrics = options.font_metrics();

        let title = non_blank(options.title.as_deref());
        let subtitle = title.as_ref().and(non_blank(options.subtitle.as_deref()));
        let summary = options.summary_items().to_vec();

        let mut reservations = Reservations::new().with_summary(summary.len());
        if title.is_some() {
            reservations = reservations.with_title(subtitle.is_some());
        }
        if options.has_footer() {
            reservations = reservations.with_footer();
        }

        let specs: Vec<ColumnSpec> = visible
            .iter()
            .map(|col| col.declared_width().map_or_else(ColumnSpec::auto, ColumnSpec::fixed))
            .collect();
        let layout = TableLayout::compute(&setup, &metrics, &specs, reservations)?;

        let rows: Vec<Vec<String>> = table
            .row_slice()
            .iter()
            .map(|row| {
                visible
                    .iter()
                    .map(|col| format_cell(*col, row, OutputTarget::Document).text)
                    .collect()
            })
            .collect();

        let totals: Option<Vec<String>> = table
            .flags(options.table_defaults())
            .include_totals
            .then(|| {
                visible
                    .iter()
                    .enumerate()
                    .map(|(i, col)| {
                        if col.is_totaled() {
                            let sum: f64 = table
                                .row_slice()
                                .iter()
                                .filter_map(|row| col.value_of(row).as_f64())
                                .sum();
                            format_value(&CellValue::Number(sum), col.data_type, OutputTarget::Document)
                                .text
                        } else if i == 0 {
                            TOTAL_LABEL.to_string()
                        } else {
                            String::new()
                        }
                    })
                    .collect()
            });

        // The totals row takes one slot after the last data row
        let slots = rows.len() + usize::from(totals.is_some());
        let pages = paginate(slots, layout.rows_per_page);
        tracing::debug!(
            "pdf layout: {} rows, {} per page, {} pages",
            rows.len(),
            layout.rows_per_page,
            pages.len()
        );

        Ok(Self {
            setup,
            metrics,
            layout,
            pages,
            headers: visible.iter().map(|col| col.header.clone()).collect(),
            alignments: visible.iter().map(|col| col.alignment()).collect(),
            rows,
            totals,
            title,
            subtitle,
            author: non_blank(options.author.as_deref()),
            summary,
            watermark: non_blank(options.watermark.as_deref()),
            page_numbers: options.include_page_numbers,
            timestamp: options.include_timestamp,
            palette: Palette::from_styling(&options.styling),
        })
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn pages(&self) -> &[PageRange] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Data rows, excluding the totals row
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Serialize the document
    pub fn write(&self, generated_at: NaiveDateTime) -> PdfResult<Vec<u8>> {
        let ids = ObjectIds::new(self.pages.len());
        let media_box = MediaBox::new(self.setup.width(), self.setup.height());
        let info = DocumentInfo {
            title: self.title.clone(),
            author: self.author.clone(),
            creation_date: Some(generated_at),
        };

        let mut pdf = PdfWriter::new(Vec::new());
        pdf.write_header()?;
        pdf.write_object(ObjectIds::CATALOG, &create_catalog(ObjectIds::PAGES).into())?;
        pdf.write_object(ObjectIds::PAGES, &create_pages(&ids.page_refs()).into())?;
        pdf.write_object(
            ObjectIds::BODY_FONT,
            &create_standard_font_dict(StandardFont::Helvetica).into(),
        )?;
        pdf.write_object(
            ObjectIds::BOLD_FONT,
            &create_standard_font_dict(StandardFont::HelveticaBold).into(),
        )?;
        pdf.write_object(ObjectIds::INFO, &info.to_dictionary().into())?;

        for page in &self.pages {
            let i = page.index;
            let content = self.render_page(page, generated_at);
            pdf.write_stream_object(ids.content(i), PdfStream::new(content.into_bytes()))?;
            pdf.write_object(
                ids.resources(i),
                &create_resources(ObjectIds::BODY_FONT, ObjectIds::BOLD_FONT).into(),
            )?;
            pdf.write_object(
                ids.page(i),
                &create_page(ObjectIds::PAGES, media_box, ids.content(i), ids.resources(i)).into(),
            )?;
        }

        pdf.write_xref_and_trailer(ObjectIds::CATALOG, Some(ObjectIds::INFO))?;
        let bytes = pdf.finish()?;
        tracing::debug!("pdf document: {} pages, {} bytes", self.pages.len(), bytes.len());
        Ok(bytes)
    }

    /// Draw one page
    fn render_page(&self, page: &PageRange, generated_at: NaiveDateTime) -> ContentStream {
        let mut cs = ContentStream::new();
        if page.index == 0 {
            self.draw_title(&mut cs);
            self.draw_summary(&mut cs);
        }
        self.draw_header(&mut cs);
        for (position, slot) in page.slots.clone().enumerate() {
            self.draw_slot(&mut cs, position, slot);
        }
        self.draw_grid(&mut cs, page.len());
        self.draw_footer(&mut cs, page.index, generated_at);
        self.draw_watermark(&mut cs);
        cs
    }

    /// Top edge of the content area
    fn content_top(&self) -> f64 {
        self.setup.height() - self.setup.margins.top
    }

    fn title_block_height(&self) -> f64 {
        match (&self.title, &self.subtitle) {
            (None, _) => 0.0,
            (Some(_), None) => TITLE_HEIGHT + BLOCK_GAP,
            (Some(_), Some(_)) => TITLE_HEIGHT + SUBTITLE_HEIGHT + BLOCK_GAP,
        }
    }

    fn text_width_at(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * self.metrics.char_width_ratio
    }

    fn draw_title(&self, cs: &mut ContentStream) {
        let Some(title) = &self.title else {
            return;
        };
        let top = self.content_top();
        let max_chars = (self.setup.content_width() / (TITLE_FONT_SIZE * self.metrics.char_width_ratio))
            as usize;
        cs.set_fill_color(self.palette.title).text(
            StandardFont::HelveticaBold,
            TITLE_FONT_SIZE,
            self.layout.start_x,
            top - TITLE_FONT_SIZE,
            &fit_text(title, max_chars),
        );
        if let Some(subtitle) = &self.subtitle {
            cs.set_fill_color(self.palette.text).text(
                StandardFont::Helvetica,
                SUBTITLE_FONT_SIZE,
                self.layout.start_x,
                top - TITLE_HEIGHT - SUBTITLE_FONT_SIZE,
                subtitle,
            );
        }
    }

    /// Label/value pairs in two columns
    fn draw_summary(&self, cs: &mut ContentStream) {
        if self.summary.is_empty() {
            return;
        }
        let size = self.metrics.font_size;
        let top = self.content_top() - self.title_block_height();
        let column_width = self.setup.content_width() / 2.0;

        cs.set_fill_color(self.palette.text);
        for (i, item) in self.summary.iter().enumerate() {
            let x = self.layout.start_x + (i % 2) as f64 * column_width;
            let baseline = top - (i / 2 + 1) as f64 * SUMMARY_LINE_HEIGHT + (SUMMARY_LINE_HEIGHT - size) / 2.0;
            let label = format!("{}:", item.label);
            cs.text(StandardFont::HelveticaBold, size, x, baseline, &label);
            cs.text(
                StandardFont::Helvetica,
                size,
                x + self.text_width_at(&label, size) + self.metrics.char_width(),
                baseline,
                &item.value,
            );
        }
    }

    fn draw_header(&self, cs: &mut ContentStream) {
        let layout = &self.layout;
        cs.set_fill_color(self.palette.header_background).fill_rect(
            layout.start_x,
            layout.start_y - layout.header_height,
            layout.table_width,
            layout.header_height,
        );
        cs.set_fill_color(self.palette.header_text);
        for (col, header) in self.headers.iter().enumerate() {
            self.cell_text(cs, StandardFont::HelveticaBold, col, layout.start_y, layout.header_height, header);
        }
    }

    /// Draw a data row, or the totals row when `slot` is past the data
    fn draw_slot(&self, cs: &mut ContentStream, position: usize, slot: usize) {
        let layout = &self.layout;
        let top = layout.row_top(position);

        let (cells, font) = match self.rows.get(slot) {
            Some(cells) => {
                if slot % 2 == 1 {
                    cs.set_fill_color(self.palette.alternate_row).fill_rect(
                        layout.start_x,
                        top - layout.row_height,
                        layout.table_width,
                        layout.row_height,
                    );
                }
                (cells, StandardFont::Helvetica)
            }
            None => {
                let Some(totals) = &self.totals else {
                    return;
                };
                cs.set_stroke_color(self.palette.border)
                    .set_line_width(TOTALS_RULE_WIDTH)
                    .line(layout.start_x, top, layout.start_x + layout.table_width, top);
                (totals, StandardFont::HelveticaBold)
            }
        };

        cs.set_fill_color(self.palette.text);
        for (col, text) in cells.iter().enumerate() {
            self.cell_text(cs, font, col, top, layout.row_height, text);
        }
    }

    /// Aligned, truncated text inside one cell
    fn cell_text(&self, cs: &mut ContentStream, font: StandardFont, col: usize, top: f64, height: f64, text: &str) {
        let Some(geometry) = self.layout.columns.get(col) else {
            return;
        };
        let fitted = fit_text(text, geometry.max_chars);
        if fitted.is_empty() {
            return;
        }
        let size = self.metrics.font_size;
        let width = self.metrics.text_width(&fitted);
        let padding = self.metrics.cell_padding;
        let x = match self.alignments.get(col).copied().unwrap_or_default() {
            Alignment::Left => geometry.x_offset + padding,
            Alignment::Center => geometry.x_offset + (geometry.width - width) / 2.0,
            Alignment::Right => geometry.x_offset + geometry.width - padding - width,
        };
        let baseline = top - height / 2.0 - size * 0.3;
        cs.text(font, size, x, baseline, &fitted);
    }

    /// Table border and vertical column rules
    fn draw_grid(&self, cs: &mut ContentStream, rows_on_page: usize) {
        let layout = &self.layout;
        let bottom = layout.table_bottom(rows_on_page);
        cs.set_stroke_color(self.palette.border)
            .set_line_width(GRID_LINE_WIDTH)
            .stroke_rect(layout.start_x, bottom, layout.table_width, layout.start_y - bottom);
        for geometry in layout.columns.iter().skip(1) {
            cs.line(geometry.x_offset, layout.start_y, geometry.x_offset, bottom);
        }
    }

    fn draw_footer(&self, cs: &mut ContentStream, index: usize, generated_at: NaiveDateTime) {
        if !self.page_numbers && !self.timestamp {
            return;
        }
        let baseline = self.setup.margins.bottom + (FOOTER_HEIGHT - FOOTER_FONT_SIZE) / 2.0;
        cs.set_fill_color(self.palette.text);
        if self.timestamp {
            let stamp = format!("Generated: {}", generated_at.format("%m/%d/%Y %H:%M"));
            cs.text(StandardFont::Helvetica, FOOTER_FONT_SIZE, self.layout.start_x, baseline, &stamp);
        }
        if self.page_numbers {
            let label = format!("Page {} of {}", index + 1, self.pages.len());
            let right = self.layout.start_x + self.setup.content_width();
            let x = right - self.text_width_at(&label, FOOTER_FONT_SIZE);
            cs.text(StandardFont::Helvetica, FOOTER_FONT_SIZE, x, baseline, &label);
        }
    }

    /// Diagonal text across the page center
    fn draw_watermark(&self, cs: &mut ContentStream) {
        let Some(text) = &self.watermark else {
            return;
        };
        let half = self.text_width_at(text, WATERMARK_FONT_SIZE) / 2.0;
        let (sin, cos) = WATERMARK_ANGLE.to_radians().sin_cos();
        let x = self.setup.width() / 2.0 - half * cos;
        let y = self.setup.height() / 2.0 - half * sin;
        cs.save_state()
            .set_fill_color(self.palette.watermark)
            .rotated_text(StandardFont::HelveticaBold, WATERMARK_FONT_SIZE, x, y, WATERMARK_ANGLE, text)
            .restore_state();
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
