//! End-to-end export tests through the public API

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use report_export::{
    CellValue, DataType, ExportColumn, ExportError, ExportFormat, ExportOptions, ExportPhase,
    ExportRequest, ExportRequestDocument, ExportTable, Exporter, PageSize,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = zip.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// Text of every `<t>` element in document order
fn shared_strings(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
            Event::Text(t) if in_text => strings.push(t.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    strings
}

fn orders() -> ExportRequest<Value> {
    ExportRequest::new(
        vec![
            ExportColumn::field("id", "id").with_type(DataType::Number),
            ExportColumn::field("name", "name"),
            ExportColumn::field("amount", "amount")
                .with_type(DataType::Currency)
                .with_totals(),
        ],
        vec![
            json!({"id": 1, "name": "Widget", "amount": 19.99}),
            json!({"id": 2, "name": "Gadget & Co", "amount": 5}),
        ],
    )
    .with_options(ExportOptions::new().with_title("Orders").with_totals(true))
}

fn exporter<'a>() -> Exporter<'a> {
    Exporter::new().with_clock(clock())
}

#[test]
fn test_spreadsheet_totals_scenario() {
    let result = exporter().export(&orders(), ExportFormat::Xlsx).unwrap();
    assert_eq!(result.filename(), "orders-20240301.xlsx");

    let sheet = read_part(result.bytes(), "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<f>SUM(C2:C3)</f>"));
    assert!(sheet.contains("<dimension ref=\"A1:C4\"/>"));

    let strings = shared_strings(&read_part(result.bytes(), "xl/sharedStrings.xml"));
    assert_eq!(
        strings,
        vec!["id", "name", "amount", "Widget", "Gadget & Co", "Total"]
    );

    let workbook = read_part(result.bytes(), "xl/workbook.xml");
    assert!(workbook.contains("<sheet name=\"Orders\" sheetId=\"1\" r:id=\"rId1\"/>"));
}

#[test]
fn test_multi_sheet_workbook() {
    let columns = || vec![ExportColumn::<Value>::field("Region", "region")];
    let request = ExportRequest::with_sheets(vec![
        ExportTable::new("North", columns(), vec![json!({"region": "N1"})]),
        ExportTable::new("South", columns(), vec![json!({"region": "S1"}), json!({"region": "S2"})]),
    ]);
    let result = exporter().export_spreadsheet(&request).unwrap();
    assert_eq!(result.row_count(), 3);
    assert_eq!(result.filename(), "export-20240301.xlsx");

    let mut zip = ZipArchive::new(Cursor::new(result.bytes())).unwrap();
    let names: Vec<String> = zip.file_names().map(str::to_string).collect();
    assert!(names.contains(&"xl/worksheets/sheet2.xml".to_string()));
    assert!(zip.by_name("xl/worksheets/sheet3.xml").is_err());

    let workbook = read_part(result.bytes(), "xl/workbook.xml");
    assert!(workbook.contains("name=\"North\""));
    assert!(workbook.contains("name=\"South\""));
}

#[test]
fn test_date_column_serial() {
    let request = ExportRequest::new(
        vec![ExportColumn::<Value>::field("Due", "due").with_type(DataType::Date)],
        vec![json!({"due": "2024-03-01"})],
    );
    let result = exporter().export_spreadsheet(&request).unwrap();
    let sheet = read_part(result.bytes(), "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<v>45352</v>"));
}

#[test]
fn test_computed_columns_on_plain_maps() {
    type Row = HashMap<String, CellValue>;
    let row = |qty: f64, price: f64| -> Row {
        HashMap::from([
            ("qty".to_string(), CellValue::Number(qty)),
            ("price".to_string(), CellValue::Number(price)),
        ])
    };
    let request = ExportRequest::new(
        vec![
            ExportColumn::<Row>::field("Qty", "qty").with_type(DataType::Number),
            ExportColumn::<Row>::computed("Line", |r: &Row| {
                let get = |k: &str| r.get(k).and_then(CellValue::as_f64).unwrap_or(0.0);
                CellValue::Number(get("qty") * get("price"))
            })
            .with_type(DataType::Currency),
        ],
        vec![row(2.0, 1.5), row(3.0, 4.0)],
    );
    let result = exporter().export_document(&request).unwrap();
    let pdf = String::from_utf8_lossy(result.bytes()).into_owned();
    assert!(pdf.contains("($3.00) Tj"));
    assert!(pdf.contains("($12.00) Tj"));
}

#[test]
fn test_document_scenario_pages() {
    let rows: Vec<Value> = (1..=47).map(|i| json!({"n": i, "label": format!("Row {}", i)})).collect();
    let columns = vec![
        ExportColumn::field("N", "n").with_type(DataType::Number),
        ExportColumn::field("Label", "label"),
        ExportColumn::field("A", "a"),
        ExportColumn::field("B", "b"),
        ExportColumn::field("C", "c"),
    ];
    let request = ExportRequest::new(columns, rows).with_options(
        ExportOptions::new().with_page_size(PageSize::Custom {
            width: 612.0,
            height: 600.0,
        }),
    );
    let result = exporter().export_document(&request).unwrap();
    let pdf = String::from_utf8_lossy(result.bytes()).into_owned();
    assert!(pdf.contains("/Type /Pages"));
    assert!(pdf.contains("/Count 3"));
    assert!(pdf.contains("(Page 3 of 3) Tj"));
    assert_eq!(result.row_count(), 47);
}

#[test]
fn test_validation_error_lists_every_issue() {
    let request = ExportRequest::<Value>::with_sheets(vec![
        ExportTable::new("A name that is far too long for a sheet", Vec::new(), vec![]),
    ]);
    let err = exporter().export(&request, ExportFormat::Pdf).unwrap_err();
    assert!(matches!(err, ExportError::Validation(_)));
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("exceeds 31 characters"));
    assert!(errors[1].ends_with("has no columns"));
}

#[test]
fn test_json_request_end_to_end() {
    let json = r#"{
        "title": "Payroll March",
        "filename": "payroll.xlsx",
        "autoFilter": false,
        "columns": [
            {"header": "Employee", "field": "who.name"},
            {"header": "Rate", "field": "rate", "type": "percentage"},
            {"header": "Active", "field": "active", "type": "boolean"}
        ],
        "data": [
            {"who": {"name": "Ada"}, "rate": 0.125, "active": true}
        ]
    }"#;
    let request = ExportRequestDocument::from_json(json).unwrap().into_request();
    let mut phases = Vec::new();
    let result = Exporter::new()
        .with_clock(clock())
        .on_progress(|p| phases.push(p.phase))
        .export(&request, ExportFormat::Xlsx)
        .unwrap();
    assert_eq!(result.filename(), "payroll-20240301.xlsx");
    assert_eq!(phases.last(), Some(&ExportPhase::Complete));

    let sheet = read_part(result.bytes(), "xl/worksheets/sheet1.xml");
    assert!(!sheet.contains("autoFilter"));
    assert!(sheet.contains("<v>0.125</v>"));
    assert!(sheet.contains("t=\"b\""));

    let pdf = exporter().export(&request, ExportFormat::Pdf).unwrap();
    let text = String::from_utf8_lossy(pdf.bytes()).into_owned();
    assert!(text.contains("(12.50%) Tj"));
    assert!(text.contains("(Yes) Tj"));
    assert_eq!(pdf.filename(), "payroll-xlsx-20240301.pdf");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_xref_offsets_point_at_objects(rows in 0usize..120, totals in any::<bool>()) {
        let data: Vec<Value> = (0..rows).map(|i| json!({"i": i, "v": i as f64 * 1.5})).collect();
        let request = ExportRequest::new(
            vec![
                ExportColumn::field("I", "i").with_type(DataType::Number),
                ExportColumn::field("V", "v").with_type(DataType::Currency).with_totals(),
            ],
            data,
        )
        .with_options(ExportOptions::new().with_totals(totals));
        let result = exporter().export_document(&request).unwrap();
        let bytes = result.bytes();
        let text = String::from_utf8_lossy(bytes).into_owned();

        let start = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let xref: usize = text[start..].lines().next().unwrap().parse().unwrap();
        let table = std::str::from_utf8(&bytes[xref..]).unwrap();
        let mut lines = table.lines();
        prop_assert_eq!(lines.next(), Some("xref"));
        let size: usize = lines.next().unwrap().split(' ').nth(1).unwrap().parse().unwrap();
        prop_assert_eq!(lines.next(), Some("0000000000 65535 f "));
        for k in 1..size {
            let offset: usize = lines.next().unwrap()[..10].parse().unwrap();
            let header = format!("{} 0 obj", k);
            prop_assert!(bytes[offset..].starts_with(header.as_bytes()));
        }
    }
}
