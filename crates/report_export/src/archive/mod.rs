//! Archive Container
//!
//! A minimal ZIP writer for stored (uncompressed) entries, used to package
//! the spreadsheet parts.
//!
//! # Architecture
//!
//! - `crc`: CRC-32 lookup table and checksum
//! - `writer`: local headers, central directory, end record

mod crc;
mod writer;

pub use crc::Crc32;
pub use writer::{
    Archive, ArchiveBuilder, ArchiveEntry, ArchiveError, CENTRAL_HEADER_LEN,
    END_OF_CENTRAL_DIR_LEN, LOCAL_HEADER_LEN,
};
