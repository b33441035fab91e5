//! PDF Font Handling
//!
//! Documents use two of the standard 14 fonts, which every viewer provides,
//! so nothing is embedded. Text is encoded as WinAnsi for both.

use super::objects::{PdfDictionary, PdfObject};

/// Standard fonts used by the table document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Body text
    Helvetica,
    /// Title, header band, and totals row
    HelveticaBold,
}

impl StandardFont {
    /// The PDF base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    pub fn for_weight(bold: bool) -> Self {
        if bold {
            StandardFont::HelveticaBold
        } else {
            StandardFont::Helvetica
        }
    }
}

/// Create the font dictionary for a standard font
pub fn create_standard_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
    dict
}

/// WinAnsi code for characters outside Latin-1 that the encoding carries
fn win_ansi_extra(c: char) -> Option<u8> {
    let code = match c {
        '\u{20AC}' => 0x80, // euro
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encode text as WinAnsi bytes
///
/// Line breaks and tabs become spaces; characters the encoding cannot
/// represent become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}
