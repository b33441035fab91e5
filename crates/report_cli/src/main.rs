//! report-export - export a JSON-described table to XLSX or PDF
//!
//! ```text
//! report-export orders.json --format pdf --out ./reports --title "March Orders"
//! ```
//!
//! Set `RUST_LOG=report_export=debug` to trace layout and packaging.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use report_export::{ExportFormat, ExportRequestDocument, Exporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "report-export", version, about = "Export a JSON-described table to XLSX or PDF")]
struct Args {
    /// JSON request: options plus `columns` and `data`, or `sheets`
    request: PathBuf,

    /// Output format: xlsx or pdf
    #[arg(short, long, default_value = "xlsx")]
    format: ExportFormat,

    /// Directory the file is written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Override the request title
    #[arg(long)]
    title: Option<String>,

    /// Fixed generation time (`YYYY-MM-DDTHH:MM:SS`) for reproducible output
    #[arg(long, value_parser = parse_timestamp)]
    generated_at: Option<NaiveDateTime>,
}

/// What was written
#[derive(Debug)]
struct Written {
    path: PathBuf,
    bytes: usize,
    rows: usize,
}

fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map_err(|e| e.to_string())
}

fn load_request(path: &Path) -> Result<ExportRequestDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    ExportRequestDocument::from_json(&json)
        .with_context(|| format!("failed to parse request {}", path.display()))
}

fn run(args: &Args) -> Result<Written> {
    let mut document = load_request(&args.request)?;
    if let Some(title) = &args.title {
        document.options.title = Some(title.clone());
    }
    let request = document.into_request();

    let mut exporter = Exporter::new();
    if let Some(at) = args.generated_at {
        exporter = exporter.with_clock(at);
    }
    let result = exporter
        .export(&request, args.format)
        .with_context(|| format!("{} export failed", args.format))?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let path = args.out.join(result.filename());
    fs::write(&path, result.bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!("wrote {}", path.display());

    Ok(Written {
        path,
        bytes: result.byte_size(),
        rows: result.row_count(),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let written = run(&args)?;
    println!(
        "{} ({} bytes, {} rows)",
        written.path.display(),
        written.bytes,
        written.rows
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REQUEST: &str = r#"{
        "title": "Weekly Orders",
        "includeTotals": true,
        "columns": [
            {"header": "Item", "field": "item"},
            {"header": "Amount", "field": "amount", "type": "currency", "includeInTotals": true}
        ],
        "data": [{"item": "Pens", "amount": 3.5}, {"item": "Ink", "amount": 12}]
    }"#;

    fn setup(json: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, json).unwrap();
        (dir, path)
    }

    fn args(dir: &TempDir, request: PathBuf, extra: &[&str]) -> Args {
        let out = dir.path().join("out");
        let mut argv = vec![
            "report-export".to_string(),
            request.display().to_string(),
            "--out".to_string(),
            out.display().to_string(),
            "--generated-at".to_string(),
            "2024-03-01T10:00:00".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_writes_spreadsheet() {
        let (dir, request) = setup(REQUEST);
        let written = run(&args(&dir, request, &[])).unwrap();
        assert_eq!(written.path, dir.path().join("out").join("weekly-orders-20240301.xlsx"));
        assert_eq!(written.rows, 2);
        let bytes = fs::read(&written.path).unwrap();
        assert_eq!(bytes.len(), written.bytes);
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_writes_pdf_with_title_override() {
        let (dir, request) = setup(REQUEST);
        let written = run(&args(&dir, request, &["--format", "pdf", "--title", "Audit Copy"])).unwrap();
        assert!(written.path.ends_with("audit-copy-20240301.pdf"));
        let bytes = fs::read(&written.path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Audit Copy)"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let (_dir, request) = setup(REQUEST);
        let argv = ["report-export", request.to_str().unwrap(), "--format", "docx"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_invalid_request_reports_context() {
        let (dir, request) = setup(r#"{"columns": [], "data": []}"#);
        let err = run(&args(&dir, request, &[])).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("xlsx export failed"));
        assert!(message.contains("Table has no columns"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_missing_request_file() {
        let dir = TempDir::new().unwrap();
        let err = run(&args(&dir, dir.path().join("nope.json"), &[])).unwrap_err();
        assert!(err.to_string().starts_with("failed to read request"));
    }

    #[test]
    fn test_timestamp_parser() {
        assert!(parse_timestamp("2024-03-01T10:00:00").is_ok());
        assert!(parse_timestamp("03/01/2024").is_err());
    }
}
