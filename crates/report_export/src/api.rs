//! Public API for report exports
//!
//! [`Exporter`] runs one export at a time: validate, format, generate,
//! package. The free functions are shorthands that use the local clock and
//! report no progress.

use crate::error::{ExportError, Result};
use crate::filename::build_filename;
use crate::pdf::{PdfError, PdfReport};
use crate::progress::{ExportProgress, ProgressSink};
use crate::request::ExportRequest;
use crate::result::{ExportFormat, ExportResult};
use crate::validation::validate_request;
use crate::xlsx::XlsxWorkbook;
use chrono::{Local, NaiveDateTime};
use report_model::Record;

/// Export driver with an optional fixed clock and progress callback
///
/// # Example
///
/// ```ignore
/// use report_export::{ExportFormat, ExportRequest, Exporter};
///
/// let mut phases = Vec::new();
/// let result = Exporter::new()
///     .on_progress(|p| phases.push(p.phase))
///     .export(&request, ExportFormat::Xlsx)?;
/// std::fs::write(result.filename(), result.bytes())?;
/// ```
#[derive(Debug)]
pub struct Exporter<'a> {
    clock: Option<NaiveDateTime>,
    progress: ProgressSink<'a>,
}

impl Default for Exporter<'_> {
    fn default() -> Self {
        Self {
            clock: None,
            progress: ProgressSink::none(),
        }
    }
}

impl<'a> Exporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed generation timestamp instead of the local clock
    pub fn with_clock(mut self, generated_at: NaiveDateTime) -> Self {
        self.clock = Some(generated_at);
        self
    }

    /// Receive progress milestones
    pub fn on_progress(mut self, callback: impl FnMut(ExportProgress) + 'a) -> Self {
        self.progress = ProgressSink::new(Some(Box::new(callback)));
        self
    }

    fn report(&mut self, progress: ExportProgress) {
        self.progress.report(progress);
    }

    fn generated_at(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    /// Run an export in the given format
    pub fn export<R: Record>(
        &mut self,
        request: &ExportRequest<R>,
        format: ExportFormat,
    ) -> Result<ExportResult> {
        match format {
            ExportFormat::Xlsx => self.export_spreadsheet(request),
            ExportFormat::Pdf => self.export_document(request),
        }
    }

    /// Export every table of the request into one workbook
    pub fn export_spreadsheet<R: Record>(&mut self, request: &ExportRequest<R>) -> Result<ExportResult> {
        self.report(ExportProgress::preparing());
        let report = validate_request(request);
        if !report.valid {
            return Err(ExportError::Validation(report));
        }
        let generated_at = self.generated_at();

        let tables = request.spreadsheet_tables();
        let total_rows: usize = tables.iter().map(|t| t.row_count()).sum();
        self.report(ExportProgress::formatting(total_rows));
        let workbook = XlsxWorkbook::prepare(&tables, &request.options)?;

        self.report(ExportProgress::generating(total_rows));
        let bytes = workbook.write(generated_at)?;

        let result = self.finish(request, ExportFormat::Xlsx, bytes, generated_at, workbook.row_count());
        tracing::info!(
            "exported {} sheets, {} rows to {} ({} bytes)",
            tables.len(),
            result.row_count(),
            result.filename(),
            result.byte_size()
        );
        Ok(result)
    }

    /// Export the primary table into a paginated document
    pub fn export_document<R: Record>(&mut self, request: &ExportRequest<R>) -> Result<ExportResult> {
        self.report(ExportProgress::preparing());
        let report = validate_request(request);
        if !report.valid {
            return Err(ExportError::Validation(report));
        }
        let generated_at = self.generated_at();

        let table = request
            .primary_table()
            .ok_or_else(|| PdfError::InvalidDocument("request has no table".to_string()))?;
        self.report(ExportProgress::formatting(table.row_count()));
        let document = PdfReport::prepare(table, &request.options)?;

        self.report(ExportProgress::generating(document.row_count()));
        let bytes = document.write(generated_at)?;

        let result = self.finish(request, ExportFormat::Pdf, bytes, generated_at, document.row_count());
        tracing::info!(
            "exported {} rows on {} pages to {} ({} bytes)",
            result.row_count(),
            document.page_count(),
            result.filename(),
            result.byte_size()
        );
        Ok(result)
    }

    fn finish<R>(
        &mut self,
        request: &ExportRequest<R>,
        format: ExportFormat,
        bytes: Vec<u8>,
        generated_at: NaiveDateTime,
        row_count: usize,
    ) -> ExportResult {
        let options = &request.options;
        let filename = build_filename(
            options.filename.as_deref(),
            options.title.as_deref(),
            format,
            generated_at.date(),
        );
        self.report(ExportProgress::complete());
        ExportResult::new(bytes, filename, format, generated_at, row_count)
    }
}

/// Export a request in the given format using the local clock
pub fn export<R: Record>(request: &ExportRequest<R>, format: ExportFormat) -> Result<ExportResult> {
    Exporter::new().export(request, format)
}

/// Export a request as an XLSX workbook using the local clock
pub fn export_spreadsheet<R: Record>(request: &ExportRequest<R>) -> Result<ExportResult> {
    Exporter::new().export_spreadsheet(request)
}

/// Export a request as a PDF document using the local clock
pub fn export_document<R: Record>(request: &ExportRequest<R>) -> Result<ExportResult> {
    Exporter::new().export_document(request)
}
