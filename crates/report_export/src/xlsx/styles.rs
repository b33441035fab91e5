//! styles.xml generation
//!
//! The palette is fixed: every cell uses one of the [`CellStyle`] entries,
//! whose discriminant is its index in `cellXfs`.

use super::namespaces;
use super::xml::{escape_xml, XML_DECLARATION};
use crate::color::RgbColor;
use crate::options::Styling;
use report_model::format::number_formats;
use report_model::DataType;

/// Cell formats, in `cellXfs` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CellStyle {
    Default = 0,
    Header = 1,
    Cell = 2,
    CellAlt = 3,
    Currency = 4,
    Date = 5,
    Percentage = 6,
    DateTime = 7,
    Total = 8,
    TotalCurrency = 9,
    TotalPercentage = 10,
}

impl CellStyle {
    pub const ALL: [CellStyle; 11] = [
        CellStyle::Default,
        CellStyle::Header,
        CellStyle::Cell,
        CellStyle::CellAlt,
        CellStyle::Currency,
        CellStyle::Date,
        CellStyle::Percentage,
        CellStyle::DateTime,
        CellStyle::Total,
        CellStyle::TotalCurrency,
        CellStyle::TotalPercentage,
    ];

    /// Index used in the `s` attribute of a cell
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Style of a data cell. Only plain cells alternate their fill.
    pub fn for_data(number_format_id: Option<u32>, row_index: usize) -> Self {
        match number_format_id {
            Some(number_formats::CURRENCY) => CellStyle::Currency,
            Some(number_formats::PERCENT) => CellStyle::Percentage,
            Some(number_formats::DATE) => CellStyle::Date,
            Some(number_formats::DATETIME) => CellStyle::DateTime,
            _ if row_index % 2 == 1 => CellStyle::CellAlt,
            _ => CellStyle::Cell,
        }
    }

    /// Style of a cell in the totals row
    pub fn for_total(data_type: DataType) -> Self {
        match data_type {
            DataType::Currency => CellStyle::TotalCurrency,
            DataType::Percentage => CellStyle::TotalPercentage,
            _ => CellStyle::Total,
        }
    }

    /// (numFmtId, fontId, fillId, borderId)
    fn xf(self) -> (u32, u32, u32, u32) {
        match self {
            CellStyle::Default => (number_formats::GENERAL, 0, 0, 0),
            CellStyle::Header => (number_formats::GENERAL, 1, 2, 1),
            CellStyle::Cell => (number_formats::GENERAL, 0, 0, 1),
            CellStyle::CellAlt => (number_formats::GENERAL, 0, 3, 1),
            CellStyle::Currency => (number_formats::CURRENCY, 0, 0, 1),
            CellStyle::Date => (number_formats::DATE, 0, 0, 1),
            CellStyle::Percentage => (number_formats::PERCENT, 0, 0, 1),
            CellStyle::DateTime => (number_formats::DATETIME, 0, 0, 1),
            CellStyle::Total => (number_formats::GENERAL, 2, 0, 1),
            CellStyle::TotalCurrency => (number_formats::CURRENCY, 2, 0, 1),
            CellStyle::TotalPercentage => (number_formats::PERCENT, 2, 0, 1),
        }
    }
}

/// Serialize the style sheet with the given palette
pub fn styles_xml(styling: &Styling) -> String {
    let argb = |hex: &str| RgbColor::from_hex(hex).to_argb();
    let text = argb(&styling.text);
    let header_text = argb(&styling.header_text);
    let header_fill = argb(&styling.header_background);
    let alternate_fill = argb(&styling.alternate_row);
    let border = argb(&styling.border);

    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<styleSheet xmlns="{}">"#, namespaces::MAIN));

    // Number formats
    let custom = [
        (number_formats::CURRENCY, number_formats::CURRENCY_CODE),
        (number_formats::DATE, number_formats::DATE_CODE),
        (number_formats::DATETIME, number_formats::DATETIME_CODE),
    ];
    xml.push_str(&format!(r#"<numFmts count="{}">"#, custom.len()));
    for (id, code) in custom {
        xml.push_str(&format!(
            r#"<numFmt numFmtId="{}" formatCode="{}"/>"#,
            id,
            escape_xml(code)
        ));
    }
    xml.push_str("</numFmts>");

    // Fonts: body, bold header, bold totals
    xml.push_str(r#"<fonts count="3">"#);
    xml.push_str(&format!(
        r#"<font><sz val="11"/><color rgb="{}"/><name val="Calibri"/><family val="2"/></font>"#,
        text
    ));
    xml.push_str(&format!(
        r#"<font><b/><sz val="11"/><color rgb="{}"/><name val="Calibri"/><family val="2"/></font>"#,
        header_text
    ));
    xml.push_str(&format!(
        r#"<font><b/><sz val="11"/><color rgb="{}"/><name val="Calibri"/><family val="2"/></font>"#,
        text
    ));
    xml.push_str("</fonts>");

    // Fills 0 and 1 are reserved by the format
    xml.push_str(r#"<fills count="4">"#);
    xml.push_str(r#"<fill><patternFill patternType="none"/></fill>"#);
    xml.push_str(r#"<fill><patternFill patternType="gray125"/></fill>"#);
    for color in [&header_fill, &alternate_fill] {
        xml.push_str(&format!(
            r#"<fill><patternFill patternType="solid"><fgColor rgb="{}"/><bgColor indexed="64"/></patternFill></fill>"#,
            color
        ));
    }
    xml.push_str("</fills>");

    xml.push_str(r#"<borders count="2">"#);
    xml.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
    xml.push_str("<border>");
    for side in ["left", "right", "top", "bottom"] {
        xml.push_str(&format!(
            r#"<{side} style="thin"><color rgb="{color}"/></{side}>"#,
            side = side,
            color = border
        ));
    }
    xml.push_str("<diagonal/></border>");
    xml.push_str("</borders>");

    xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

    xml.push_str(&format!(r#"<cellXfs count="{}">"#, CellStyle::ALL.len()));
    for style in CellStyle::ALL {
        let (num_fmt, font, fill, border_id) = style.xf();
        xml.push_str(&format!(
            r#"<xf numFmtId="{}" fontId="{}" fillId="{}" borderId="{}" xfId="0""#,
            num_fmt, font, fill, border_id
        ));
        if num_fmt != number_formats::GENERAL {
            xml.push_str(r#" applyNumberFormat="1""#);
        }
        if font != 0 {
            xml.push_str(r#" applyFont="1""#);
        }
        if fill != 0 {
            xml.push_str(r#" applyFill="1""#);
        }
        if border_id != 0 {
            xml.push_str(r#" applyBorder="1""#);
        }
        if style == CellStyle::Header {
            xml.push_str(r#" applyAlignment="1"><alignment horizontal="center" vertical="center" wrapText="1"/></xf>"#);
        } else {
            xml.push_str("/>");
        }
    }
    xml.push_str("</cellXfs>");

    xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
    xml.push_str("</styleSheet>");
    xml
}
