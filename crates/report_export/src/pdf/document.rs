//! PDF Document Structure
//!
//! Catalog, page tree, info dictionary, and the fixed object numbering of a
//! table document.

use super::objects::{PdfDictionary, PdfObject};
use chrono::NaiveDateTime;

/// Producer recorded in the info dictionary
pub const PRODUCER: &str = "report-export";

/// Object numbers, assigned before anything is written
///
/// Fixed objects come first; every page then takes three consecutive
/// numbers for its content stream, resources, and page dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectIds {
    page_count: usize,
}

impl ObjectIds {
    pub const CATALOG: u32 = 1;
    pub const PAGES: u32 = 2;
    pub const BODY_FONT: u32 = 3;
    pub const BOLD_FONT: u32 = 4;
    pub const INFO: u32 = 5;
    const FIRST_PAGE_OBJECT: u32 = 6;
    const OBJECTS_PER_PAGE: u32 = 3;

    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_base(&self, index: usize) -> u32 {
        Self::FIRST_PAGE_OBJECT + Self::OBJECTS_PER_PAGE * index as u32
    }

    pub fn content(&self, index: usize) -> u32 {
        self.page_base(index)
    }

    pub fn resources(&self, index: usize) -> u32 {
        self.page_base(index) + 1
    }

    pub fn page(&self, index: usize) -> u32 {
        self.page_base(index) + 2
    }

    /// Highest object number
    pub fn last(&self) -> u32 {
        Self::INFO + Self::OBJECTS_PER_PAGE * self.page_count as u32
    }

    /// Page object numbers in page order
    pub fn page_refs(&self) -> Vec<u32> {
        (0..self.page_count).map(|i| self.page(i)).collect()
    }
}

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
}

impl DocumentInfo {
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            dict.insert("Title", PdfObject::text(title));
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            dict.insert("Author", PdfObject::text(author));
        }
        dict.insert("Producer", PdfObject::text(PRODUCER));
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(date)));
        }
        dict
    }
}

/// `D:YYYYMMDDHHmmSS`
pub fn pdf_date(dt: NaiveDateTime) -> String {
    dt.format("D:%Y%m%d%H%M%S").to_string()
}

/// Page media box (origin at lower-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_array(&self) -> PdfObject {
        PdfObject::array(vec![
            PdfObject::int(0),
            PdfObject::int(0),
            PdfObject::real(self.width),
            PdfObject::real(self.height),
        ])
    }
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::reference(pages_ref));
    dict
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");
    let kids = page_refs.iter().map(|&r| PdfObject::reference(r)).collect();
    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::int(page_refs.len() as i64));
    dict
}

/// Resources shared by every page: the two fonts
pub fn create_resources(body_font: u32, bold_font: u32) -> PdfDictionary {
    let mut fonts = PdfDictionary::new();
    fonts.insert("F1", PdfObject::reference(body_font));
    fonts.insert("F2", PdfObject::reference(bold_font));

    let mut dict = PdfDictionary::new();
    dict.insert("Font", fonts.into());
    dict.insert(
        "ProcSet",
        PdfObject::array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
    );
    dict
}

/// Create a page dictionary
pub fn create_page(parent: u32, media_box: MediaBox, content: u32, resources: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Page");
    dict.insert("Parent", PdfObject::reference(parent));
    dict.insert("MediaBox", media_box.to_array());
    dict.insert("Contents", PdfObject::reference(content));
    dict.insert("Resources", PdfObject::reference(resources));
    dict
}
