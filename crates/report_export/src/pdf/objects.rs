//! PDF Object Model
//!
//! The subset of PDF object types a table document needs. Dictionaries keep
//! their keys sorted so identical input serializes to identical bytes.

use super::fonts::encode_win_ansi;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Integer number
    Integer(i64),
    /// Real (floating-point) number
    Real(f64),
    /// Literal string, already in the document encoding
    String(Vec<u8>),
    /// Name object (starts with /)
    Name(String),
    /// Array of objects
    Array(Vec<PdfObject>),
    /// Dictionary (key-value pairs)
    Dictionary(PdfDictionary),
    /// Stream (dictionary + byte data)
    Stream(PdfStream),
    /// Indirect reference to an object number (generation is always 0)
    Reference(u32),
}

/// PDF dictionary (sorted key-value pairs)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }

    /// Set the Type entry
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::name(type_name));
        self
    }
}

/// PDF stream (dictionary + uncompressed data)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

impl PdfStream {
    /// Create a stream whose `/Length` matches its data
    pub fn new(data: Vec<u8>) -> Self {
        let mut dict = PdfDictionary::new();
        dict.insert("Length", PdfObject::Integer(data.len() as i64));
        Self { dict, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PdfObject {
    pub fn int(n: i64) -> Self {
        PdfObject::Integer(n)
    }

    pub fn real(n: f64) -> Self {
        PdfObject::Real(n)
    }

    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    /// A literal string, encoded for the standard fonts
    pub fn text(s: &str) -> Self {
        PdfObject::String(encode_win_ansi(s))
    }

    pub fn reference(obj_num: u32) -> Self {
        PdfObject::Reference(obj_num)
    }

    pub fn array(objects: Vec<PdfObject>) -> Self {
        PdfObject::Array(objects)
    }

    /// Append every object number this object refers to
    pub fn collect_references(&self, out: &mut Vec<u32>) {
        match self {
            PdfObject::Reference(n) => out.push(*n),
            PdfObject::Array(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            PdfObject::Dictionary(dict) => {
                for (_, value) in dict.iter() {
                    value.collect_references(out);
                }
            }
            PdfObject::Stream(stream) => {
                for (_, value) in stream.dict.iter() {
                    value.collect_references(out);
                }
            }
            _ => {}
        }
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<PdfStream> for PdfObject {
    fn from(stream: PdfStream) -> Self {
        PdfObject::Stream(stream)
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(bytes) => write_literal(&mut self.writer, bytes),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => self.write_array(arr),
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => self.write_stream(stream),
            PdfObject::Reference(obj_num) => write!(self.writer, "{} 0 R", obj_num),
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => self.writer.write_all(&[byte])?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_array(&mut self, arr: &[PdfObject]) -> io::Result<()> {
        write!(self.writer, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(self.writer, " ")?;
            }
            self.write_object(obj)?;
        }
        write!(self.writer, "]")
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Real numbers without exponent and without trailing zeros
fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Write bytes as a literal string, escaping delimiters and non-printables
pub(crate) fn write_literal<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(b"(")?;
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => writer.write_all(&[b'\\', byte])?,
            0x0A => writer.write_all(b"\\n")?,
            0x0D => writer.write_all(b"\\r")?,
            0x09 => writer.write_all(b"\\t")?,
            0x20..=0x7E => writer.write_all(&[byte])?,
            _ => write!(writer, "\\{:03o}", byte)?,
        }
    }
    writer.write_all(b")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut buf = Vec::new();
        PdfSerializer::new(&mut buf).write_object(obj).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(612.0)), "612");
        assert_eq!(serialize(&PdfObject::Real(595.28)), "595.28");
        assert_eq!(serialize(&PdfObject::reference(3)), "3 0 R");
        assert_eq!(serialize(&PdfObject::name("Type")), "/Type");
        assert_eq!(serialize(&PdfObject::name("A B")), "/A#20B");
    }

    #[test]
    fn test_serialize_string() {
        assert_eq!(serialize(&PdfObject::text("Q1 (draft)")), r"(Q1 \(draft\))");
        // WinAnsi euro sign is 0x80
        assert_eq!(serialize(&PdfObject::text("€5")), r"(\2005)");
    }

    #[test]
    fn test_serialize_dictionary_sorted() {
        let mut dict = PdfDictionary::new().with_type("Page");
        dict.insert("Parent", PdfObject::reference(2));
        dict.insert("Contents", PdfObject::reference(6));
        assert_eq!(
            serialize(&dict.into()),
            "<< /Contents 6 0 R /Parent 2 0 R /Type /Page >>"
        );
    }

    #[test]
    fn test_serialize_stream() {
        let stream = PdfStream::new(b"BT ET".to_vec());
        assert_eq!(serialize(&stream.into()), "<< /Length 5 >>\nstream\nBT ET\nendstream");
    }

    #[test]
    fn test_collect_references() {
        let mut dict = PdfDictionary::new();
        dict.insert("Kids", PdfObject::array(vec![PdfObject::reference(8), PdfObject::reference(11)]));
        dict.insert("Count", PdfObject::int(2));
        let mut refs = Vec::new();
        PdfObject::from(dict).collect_references(&mut refs);
        assert_eq!(refs, vec![8, 11]);
    }
}
