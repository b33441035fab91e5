//! Workbook-level tests: the package is read back with a conformant
//! archive reader and every part is parsed as XML.

use super::*;
use crate::options::ExportOptions;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::Reader;
use report_model::{DataType, ExportColumn, ExportTable};
use serde_json::{json, Value};
use std::io::{Cursor, Read};

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn orders_table() -> ExportTable<Value> {
    ExportTable::new(
        "",
        vec![
            ExportColumn::field("id", "id").with_type(DataType::Number),
            ExportColumn::field("name", "name"),
            ExportColumn::field("amount", "amount")
                .with_type(DataType::Currency)
                .with_totals(),
        ],
        vec![
            json!({"id": 1, "name": "Alpha", "amount": 100.5}),
            json!({"id": 2, "name": "Beta", "amount": 200.25}),
        ],
    )
}

fn build(tables: &[&ExportTable<Value>], options: &ExportOptions) -> Vec<u8> {
    XlsxWorkbook::prepare(tables, options)
        .unwrap()
        .write(clock())
        .unwrap()
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn read_part(bytes: &[u8], path: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(path).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed XML at {}: {}\n{}", reader.buffer_position(), e, xml),
        }
    }
}

#[test]
fn test_package_parts() {
    let bytes = build(&[&orders_table()], &ExportOptions::new().with_title("Orders"));
    let mut names = part_names(&bytes);
    names.sort();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        assert_eq!(file.compression(), zip::CompressionMethod::Stored);
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        assert_well_formed(&xml);
    }
}

#[test]
fn test_totals_row_uses_sum_formula() {
    let options = ExportOptions::new().with_totals(true);
    let bytes = build(&[&orders_table()], &options);
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains(r#"<c r="C4" s="9"><f>SUM(C2:C3)</f><v>300.75</v></c>"#));
    let sst = read_part(&bytes, "xl/sharedStrings.xml");
    assert!(sst.contains("<si><t>Total</t></si>"));
    assert!(sheet.contains(r#"<dimension ref="A1:C4"/>"#));
    // The filter stops above the totals row
    assert!(sheet.contains(r#"<autoFilter ref="A1:C3"/>"#));
}

#[test]
fn test_cell_types_and_styles() {
    let table = ExportTable::new(
        "Types",
        vec![
            ExportColumn::field("Name", "name"),
            ExportColumn::field("Active", "active").with_type(DataType::Boolean),
            ExportColumn::field("Joined", "joined").with_type(DataType::Date),
            ExportColumn::field("Share", "share").with_type(DataType::Percentage),
            ExportColumn::field("Score", "score").with_type(DataType::Number),
        ],
        vec![
            json!({"name": "Ada", "active": true, "joined": "2024-03-01", "share": 0.25, "score": 3}),
            json!({"name": null, "active": "no", "joined": "not a date", "share": 0.5, "score": 4}),
        ],
    );
    let bytes = build(&[&table], &ExportOptions::new());
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains(r#"<c r="A2" s="2" t="s"><v>5</v></c>"#));
    assert!(sheet.contains(r#"<c r="B2" s="2" t="b"><v>1</v></c>"#));
    assert!(sheet.contains(r#"<c r="C2" s="5"><v>45352</v></c>"#));
    assert!(sheet.contains(r#"<c r="D2" s="6"><v>0.25</v></c>"#));
    assert!(sheet.contains(r#"<c r="E2" s="2"><v>3</v></c>"#));

    // Second data row: alternating fill on plain cells only
    assert!(sheet.contains(r#"<c r="A3" s="3"/>"#));
    assert!(sheet.contains(r#"<c r="B3" s="3" t="b"><v>0</v></c>"#));
    assert!(sheet.contains(r#"<c r="D3" s="6"><v>0.5</v></c>"#));
    // Unparseable dates keep their text
    let sst = read_part(&bytes, "xl/sharedStrings.xml");
    assert!(sst.contains("<t>not a date</t>"));
    assert!(!sst.contains("<t>Total</t>"));
}

#[test]
fn test_header_row_and_frozen_pane() {
    let bytes = build(&[&orders_table()], &ExportOptions::new());
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<c r="A1" s="1" t="s"><v>0</v></c>"#));
    assert!(sheet.contains(r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#));
    assert!(sheet.contains(r#"tabSelected="1""#));

    let dimension = sheet.find("<dimension").unwrap();
    let views = sheet.find("<sheetViews>").unwrap();
    let cols = sheet.find("<cols>").unwrap();
    let data = sheet.find("<sheetData>").unwrap();
    let filter = sheet.find("<autoFilter").unwrap();
    let margins = sheet.find("<pageMargins").unwrap();
    assert!(dimension < views && views < cols && cols < data && data < filter && filter < margins);
}

#[test]
fn test_flags_can_be_disabled() {
    let table = orders_table().with_auto_filter(false).with_freeze_header(false);
    let bytes = build(&[&table], &ExportOptions::new());
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(!sheet.contains("<pane"));
    assert!(!sheet.contains("<autoFilter"));
    let workbook = read_part(&bytes, "xl/workbook.xml");
    assert!(!workbook.contains("definedName"));
}

#[test]
fn test_sheet_names() {
    let first = ExportTable::new("Invoices/Q1:2024", orders_table().columns, vec![json!({})]);
    let second = ExportTable::new("invoices_q1_2024", orders_table().columns, vec![json!({})])
        .with_totals(true);
    let third = ExportTable::new("", orders_table().columns, Vec::new());
    let workbook = XlsxWorkbook::prepare(&[&first, &second, &third], &ExportOptions::new()).unwrap();
    let names: Vec<&str> = workbook.sheets().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Invoices_Q1_2024", "invoices_q1_2024_2", "Sheet3"]);
    assert!(!workbook.sheets()[0].has_totals());
    assert!(workbook.sheets()[1].has_totals());

    let bytes = workbook.write(clock()).unwrap();
    let xml = read_part(&bytes, "xl/workbook.xml");
    assert!(xml.contains(r#"<sheet name="Invoices_Q1_2024" sheetId="1" r:id="rId1"/>"#));
    assert!(xml.contains(r#"<sheet name="Sheet3" sheetId="3" r:id="rId3"/>"#));
    let rels = read_part(&bytes, "xl/_rels/workbook.xml.rels");
    assert!(rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles""#));
    assert_eq!(part_names(&bytes).iter().filter(|n| n.starts_with("xl/worksheets/")).count(), 3);
    // Only the first sheet is selected
    let sheet2 = read_part(&bytes, "xl/worksheets/sheet2.xml");
    assert!(!sheet2.contains("tabSelected"));
}

#[test]
fn test_single_table_takes_title() {
    let workbook = XlsxWorkbook::prepare(
        &[&orders_table()],
        &ExportOptions::new().with_title("Quarterly: Sales [Draft]"),
    )
    .unwrap();
    assert_eq!(workbook.sheets()[0].name, "Quarterly_ Sales _Draft_");

    let untitled = XlsxWorkbook::prepare(&[&orders_table()], &ExportOptions::new()).unwrap();
    assert_eq!(untitled.sheets()[0].name, "Sheet1");
}

#[test]
fn test_shared_strings_are_pooled_across_sheets() {
    let a = orders_table();
    let mut b = orders_table();
    b.name = "Second".into();
    let mut a_named = a;
    a_named.name = "First".into();
    let workbook = XlsxWorkbook::prepare(&[&a_named, &b], &ExportOptions::new()).unwrap();
    // id, name, amount, Alpha, Beta
    assert_eq!(workbook.shared_strings().len(), 5);
    assert_eq!(workbook.row_count(), 4);
}

#[test]
fn test_identical_input_gives_identical_bytes() {
    let options = ExportOptions::new().with_title("Orders").with_totals(true);
    let first = build(&[&orders_table()], &options);
    let second = build(&[&orders_table()], &options);
    assert_eq!(first, second);
}

#[test]
fn test_document_properties() {
    let options = ExportOptions::new().with_title("Orders").with_author("Finance");
    let bytes = build(&[&orders_table()], &options);
    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Orders</dc:title>"));
    assert!(core.contains("<dc:creator>Finance</dc:creator>"));
    assert!(core.contains("2024-03-01T12:00:00Z"));
    let app = read_part(&bytes, "docProps/app.xml");
    assert!(app.contains("<vt:lpstr>Orders</vt:lpstr>"));
}

#[test]
fn test_no_tables_is_an_error() {
    let tables: [&ExportTable<Value>; 0] = [];
    assert!(matches!(
        XlsxWorkbook::prepare(&tables, &ExportOptions::new()),
        Err(XlsxError::NoSheets)
    ));
}

#[test]
fn test_custom_palette_reaches_styles() {
    let mut options = ExportOptions::new();
    options.styling.header_background = "#336699".into();
    let bytes = build(&[&orders_table()], &options);
    let styles = read_part(&bytes, "xl/styles.xml");
    assert!(styles.contains(r#"<fgColor rgb="FF336699"/>"#));
}
