//! xl/workbook.xml generation

use super::cell_ref::absolute_range_ref;
use super::namespaces;
use super::worksheet::SheetContent;
use super::xml::{escape_xml, XML_DECLARATION};

/// Calculation engine id written by current spreadsheet applications
const CALC_ID: u32 = 191029;

/// Serialize the workbook part. Sheet `i` uses relationship `rId{i+1}`.
pub fn workbook_xml(sheets: &[SheetContent]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<workbook xmlns="{}" xmlns:r="{}">"#,
        namespaces::MAIN,
        namespaces::R
    ));
    xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);

    xml.push_str("<sheets>");
    for (i, sheet) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(&sheet.name),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets>");

    // Filter ranges are named per sheet so applications restore them
    let filters: Vec<String> = sheets
        .iter()
        .enumerate()
        .filter_map(|(i, sheet)| {
            let (first, last) = sheet.filter_range()?;
            Some(format!(
                r#"<definedName name="_xlnm._FilterDatabase" localSheetId="{}" hidden="1">{}!{}</definedName>"#,
                i,
                escape_xml(&quote_sheet_name(&sheet.name)),
                absolute_range_ref(first, last)
            ))
        })
        .collect();
    if !filters.is_empty() {
        xml.push_str("<definedNames>");
        for filter in filters {
            xml.push_str(&filter);
        }
        xml.push_str("</definedNames>");
    }

    xml.push_str(&format!(
        r#"<calcPr calcId="{}" fullCalcOnLoad="1"/>"#,
        CALC_ID
    ));
    xml.push_str("</workbook>");
    xml
}

/// Quote a sheet name for use in a formula reference
fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}
