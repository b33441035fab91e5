//! Stored ZIP writer
//!
//! Entries are written in insertion order, each as a local file header
//! followed by its raw bytes. The central directory and end-of-central-
//! directory record follow the last entry. Nothing is compressed.

use super::crc::Crc32;
use thiserror::Error;

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4B50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4B50;
const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x0605_4B50;

/// Fixed part of a local file header
pub const LOCAL_HEADER_LEN: usize = 30;
/// Fixed part of a central directory record
pub const CENTRAL_HEADER_LEN: usize = 46;
/// End-of-central-directory record without comment
pub const END_OF_CENTRAL_DIR_LEN: usize = 22;

/// Version 2.0: the minimum for stored entries with directory paths
const VERSION: u16 = 20;
/// Method 0: stored
const METHOD_STORED: u16 = 0;
/// General purpose flag bit 11: file name is UTF-8
const FLAG_UTF8: u16 = 1 << 11;
/// 1980-01-01 00:00 in DOS format, so output does not depend on the clock
const DOS_TIME: u16 = 0;
const DOS_DATE: u16 = (1 << 5) | 1;

/// Error type for archive assembly
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Entry path is empty")]
    EmptyPath,

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Entry path too long: {0}")]
    PathTooLong(String),

    #[error("Archive exceeds 4 GiB at entry {0}")]
    TooLarge(String),

    #[error("Too many entries: {0}")]
    TooManyEntries(usize),
}

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// An entry as written into the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub bytes: Vec<u8>,
    pub crc32: u32,
    /// Offset of the entry's local file header
    pub offset: u32,
}

impl ArchiveEntry {
    fn flags(&self) -> u16 {
        if self.path.is_ascii() {
            0
        } else {
            FLAG_UTF8
        }
    }

    /// Bytes taken by the local header, path, and payload
    pub fn local_len(&self) -> usize {
        LOCAL_HEADER_LEN + self.path.len() + self.bytes.len()
    }
}

/// A finished archive
#[derive(Debug, Clone)]
pub struct Archive {
    pub bytes: Vec<u8>,
    pub entries: Vec<ArchiveEntry>,
    /// Offset of the first central directory record
    pub central_directory_offset: u32,
}

/// Collects entries and assembles a stored ZIP archive
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; paths must be unique
    pub fn add(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(ArchiveError::EmptyPath);
        }
        if path.len() > u16::MAX as usize {
            return Err(ArchiveError::PathTooLong(path));
        }
        if self.entries.iter().any(|(p, _)| *p == path) {
            return Err(ArchiveError::DuplicateEntry(path));
        }
        self.entries.push((path, bytes.into()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assemble the archive bytes
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.build()?.bytes)
    }

    /// Assemble the archive, keeping per-entry bookkeeping
    pub fn build(self) -> Result<Archive> {
        if self.entries.len() > u16::MAX as usize {
            return Err(ArchiveError::TooManyEntries(self.entries.len()));
        }

        let crc = Crc32::new();
        let payload: usize = self
            .entries
            .iter()
            .map(|(p, b)| LOCAL_HEADER_LEN + CENTRAL_HEADER_LEN + 2 * p.len() + b.len())
            .sum();
        let mut out = Vec::with_capacity(payload + END_OF_CENTRAL_DIR_LEN);
        let mut entries = Vec::with_capacity(self.entries.len());

        for (path, bytes) in self.entries {
            let offset = to_u32(out.len(), &path)?;
            let size = to_u32(bytes.len(), &path)?;
            let entry = ArchiveEntry {
                crc32: crc.checksum(&bytes),
                path,
                bytes,
                offset,
            };

            put_u32(&mut out, LOCAL_HEADER_SIGNATURE);
            put_u16(&mut out, VERSION);
            put_u16(&mut out, entry.flags());
            put_u16(&mut out, METHOD_STORED);
            put_u16(&mut out, DOS_TIME);
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, entry.crc32);
            put_u32(&mut out, size);
            put_u32(&mut out, size);
            put_u16(&mut out, entry.path.len() as u16);
            put_u16(&mut out, 0);
            out.extend_from_slice(entry.path.as_bytes());
            out.extend_from_slice(&entry.bytes);

            debug_assert_eq!(out.len(), offset as usize + entry.local_len());
            entries.push(entry);
        }

        let cd_offset = to_u32(out.len(), "central directory")?;
        for entry in &entries {
            let size = entry.bytes.len() as u32;
            put_u32(&mut out, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut out, VERSION);
            put_u16(&mut out, VERSION);
            put_u16(&mut out, entry.flags());
            put_u16(&mut out, METHOD_STORED);
            put_u16(&mut out, DOS_TIME);
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, entry.crc32);
            put_u32(&mut out, size);
            put_u32(&mut out, size);
            put_u16(&mut out, entry.path.len() as u16);
            put_u16(&mut out, 0); // extra field length
            put_u16(&mut out, 0); // comment length
            put_u16(&mut out, 0); // disk number start
            put_u16(&mut out, 0); // internal attributes
            put_u32(&mut out, 0); // external attributes
            put_u32(&mut out, entry.offset);
            out.extend_from_slice(entry.path.as_bytes());
        }
        let cd_size = to_u32(out.len() - cd_offset as usize, "central directory")?;

        let count = entries.len() as u16;
        put_u32(&mut out, END_OF_CENTRAL_DIR_SIGNATURE);
        put_u16(&mut out, 0); // this disk
        put_u16(&mut out, 0); // disk with central directory
        put_u16(&mut out, count);
        put_u16(&mut out, count);
        put_u32(&mut out, cd_size);
        put_u32(&mut out, cd_offset);
        put_u16(&mut out, 0); // comment length

        tracing::debug!(
            "assembled archive: {} entries, {} bytes",
            entries.len(),
            out.len()
        );

        Ok(Archive {
            bytes: out,
            entries,
            central_directory_offset: cd_offset,
        })
    }
}

fn to_u32(n: usize, at: &str) -> Result<u32> {
    u32::try_from(n).map_err(|_| ArchiveError::TooLarge(at.to_string()))
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(buf: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([buf[at], buf[at + 1]])
    }

    fn u32_at(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    #[test]
    fn test_single_entry_layout() {
        let mut builder = ArchiveBuilder::new();
        builder.add("a.txt", b"hello".to_vec()).unwrap();
        let archive = builder.build().unwrap();
        let buf = &archive.bytes;

        // Local header
        assert_eq!(u32_at(buf, 0), LOCAL_HEADER_SIGNATURE);
        assert_eq!(&buf[0..4], b"PK\x03\x04");
        assert_eq!(u16_at(buf, 4), 20);
        assert_eq!(u16_at(buf, 6), 0);
        assert_eq!(u16_at(buf, 8), 0);
        assert_eq!(u16_at(buf, 12), DOS_DATE);
        assert_eq!(u32_at(buf, 14), 0x3610_A686);
        assert_eq!(u32_at(buf, 18), 5);
        assert_eq!(u32_at(buf, 22), 5);
        assert_eq!(u16_at(buf, 26), 5);
        assert_eq!(&buf[30..35], b"a.txt");
        assert_eq!(&buf[35..40], b"hello");

        // Central directory
        assert_eq!(archive.central_directory_offset, 40);
        assert_eq!(u32_at(buf, 40), CENTRAL_HEADER_SIGNATURE);
        assert_eq!(u32_at(buf, 40 + 16), 0x3610_A686);
        assert_eq!(u32_at(buf, 40 + 42), 0);
        assert_eq!(&buf[86..91], b"a.txt");

        // End of central directory
        let eocd = 91;
        assert_eq!(u32_at(buf, eocd), END_OF_CENTRAL_DIR_SIGNATURE);
        assert_eq!(u16_at(buf, eocd + 8), 1);
        assert_eq!(u16_at(buf, eocd + 10), 1);
        assert_eq!(u32_at(buf, eocd + 12), 51);
        assert_eq!(u32_at(buf, eocd + 16), 40);
        assert_eq!(buf.len(), eocd + END_OF_CENTRAL_DIR_LEN);
    }

    #[test]
    fn test_offsets_accumulate() {
        let mut builder = ArchiveBuilder::new();
        builder.add("one", vec![1u8; 10]).unwrap();
        builder.add("dir/two", vec![2u8; 3]).unwrap();
        builder.add("three", Vec::new()).unwrap();
        let archive = builder.build().unwrap();

        let mut expected = 0usize;
        for entry in &archive.entries {
            assert_eq!(entry.offset as usize, expected);
            assert_eq!(u32_at(&archive.bytes, expected), LOCAL_HEADER_SIGNATURE);
            expected += entry.local_len();
        }
        assert_eq!(archive.central_directory_offset as usize, expected);
    }

    #[test]
    fn test_utf8_flag_only_for_non_ascii() {
        let mut builder = ArchiveBuilder::new();
        builder.add("plain.xml", b"x".to_vec()).unwrap();
        builder.add("données.xml", b"y".to_vec()).unwrap();
        let archive = builder.build().unwrap();
        let second = archive.entries[1].offset as usize;
        assert_eq!(u16_at(&archive.bytes, 6), 0);
        assert_eq!(u16_at(&archive.bytes, second + 6), FLAG_UTF8);
    }

    #[test]
    fn test_duplicate_and_empty_paths() {
        let mut builder = ArchiveBuilder::new();
        builder.add("a", b"1".to_vec()).unwrap();
        assert!(matches!(
            builder.add("a", b"2".to_vec()),
            Err(ArchiveError::DuplicateEntry(_))
        ));
        assert!(matches!(builder.add("", b"3".to_vec()), Err(ArchiveError::EmptyPath)));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_empty_archive() {
        let bytes = ArchiveBuilder::new().finish().unwrap();
        assert_eq!(bytes.len(), END_OF_CENTRAL_DIR_LEN);
        assert_eq!(u32_at(&bytes, 0), END_OF_CENTRAL_DIR_SIGNATURE);
    }
}
