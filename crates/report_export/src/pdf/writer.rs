//! PDF Writer
//!
//! Writes the file structure: header, body objects, cross-reference table,
//! and trailer. Byte offsets are tracked as objects are written so the
//! cross-reference table can point at each `N 0 obj` line exactly.

use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use layout_engine::LayoutError;
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Broken object graph
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Result type for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;

/// PDF version written in the header
pub const PDF_VERSION: &str = "1.4";

#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    offset: u64,
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    objects: Vec<ObjectEntry>,
    /// Every object number referenced by a written object
    references: Vec<u32>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }

    fn write_bytes(&mut self, data: &[u8]) -> PdfResult<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> PdfResult<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> PdfResult<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    ///
    /// Objects must be written in ascending number order.
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> PdfResult<()> {
        if let Some(last) = self.objects.last() {
            if obj_num <= last.obj_num {
                return Err(PdfError::InvalidDocument(format!(
                    "object {} written after object {}",
                    obj_num, last.obj_num
                )));
            }
        }
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")?;

        object.collect_references(&mut self.references);
        self.objects.push(ObjectEntry { obj_num, offset });
        Ok(())
    }

    /// Write a stream object; the data is stored uncompressed
    pub fn write_stream_object(&mut self, obj_num: u32, stream: PdfStream) -> PdfResult<()> {
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Check that the written objects form a complete, closed graph
    fn check_graph(&self, catalog: u32, info: Option<u32>) -> PdfResult<()> {
        for (expected, entry) in (1u32..).zip(&self.objects) {
            if entry.obj_num != expected {
                return Err(PdfError::InvalidDocument(format!(
                    "object {} was never written",
                    expected
                )));
            }
        }
        let count = self.objects.len() as u32;
        let dangling = self
            .references
            .iter()
            .copied()
            .chain(std::iter::once(catalog))
            .chain(info)
            .find(|&r| r == 0 || r > count);
        match dangling {
            Some(r) => Err(PdfError::InvalidDocument(format!(
                "reference to missing object {}",
                r
            ))),
            None => Ok(()),
        }
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog: u32, info: Option<u32>) -> PdfResult<()> {
        self.check_graph(catalog, info)?;

        let xref_offset = self.position;
        let size = self.objects.len() + 1;
        let offsets: Vec<u64> = self.objects.iter().map(|e| e.offset).collect();

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;
        self.write_str("0000000000 65535 f \n")?;
        for offset in offsets {
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
        }

        self.write_str("trailer\n")?;
        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::int(size as i64));
        trailer.insert("Root", PdfObject::reference(catalog));
        if let Some(info) = info {
            trailer.insert("Info", PdfObject::reference(info));
        }
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;
        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> PdfResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
