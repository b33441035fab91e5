//! docProps/core.xml and docProps/app.xml generation

use super::xml::{escape_xml, XML_DECLARATION};
use chrono::NaiveDateTime;

/// Application name recorded in the extended properties
pub const APPLICATION: &str = "report-export";

/// Core properties: title, creator, timestamps
pub fn core_xml(title: Option<&str>, creator: Option<&str>, created: NaiveDateTime) -> String {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    let creator = creator.filter(|c| !c.is_empty()).unwrap_or(APPLICATION);
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(creator)));
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        timestamp
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        timestamp
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

/// Extended properties: application and sheet titles
pub fn app_xml<S: AsRef<str>>(sheet_names: &[S]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties""#,
        r#" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    xml.push_str(&format!("<Application>{}</Application>", APPLICATION));
    xml.push_str(&format!(
        concat!(
            r#"<HeadingPairs><vt:vector size="2" baseType="variant">"#,
            r#"<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>"#,
            r#"<vt:variant><vt:i4>{}</vt:i4></vt:variant>"#,
            r#"</vt:vector></HeadingPairs>"#
        ),
        sheet_names.len()
    ));
    xml.push_str(&format!(
        r#"<TitlesOfParts><vt:vector size="{}" baseType="lpstr">"#,
        sheet_names.len()
    ));
    for name in sheet_names {
        xml.push_str(&format!("<vt:lpstr>{}</vt:lpstr>", escape_xml(name.as_ref())));
    }
    xml.push_str("</vt:vector></TitlesOfParts>");
    xml.push_str("</Properties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_core_properties() {
        let xml = core_xml(Some("Q1 <Sales>"), None, created());
        assert!(xml.contains("<dc:title>Q1 &lt;Sales&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>report-export</dc:creator>"));
        assert!(xml.contains(">2024-03-01T09:30:00Z</dcterms:created>"));
    }

    #[test]
    fn test_core_properties_without_title() {
        let xml = core_xml(None, Some("Finance"), created());
        assert!(!xml.contains("dc:title"));
        assert!(xml.contains("<dc:creator>Finance</dc:creator>"));
    }

    #[test]
    fn test_app_properties() {
        let xml = app_xml(&["North", "South"]);
        assert!(xml.contains("<vt:i4>2</vt:i4>"));
        assert!(xml.contains(r#"<vt:vector size="2" baseType="lpstr"><vt:lpstr>North</vt:lpstr><vt:lpstr>South</vt:lpstr>"#));
    }
}
