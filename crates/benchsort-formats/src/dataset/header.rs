//! Dataset metadata header
//!
//! The header is 24 bytes: three big-endian u64 values giving the row count,
//! key field count and value field count, in that order.

use crate::error::{FormatError, Result};
use crate::row::{RECORD_HEADER_SIZE, RowShape, read_fully};
use binrw::{BinRead, BinWrite};
use std::io::{Cursor, Read};

/// Size of the metadata header in bytes
pub const HEADER_SIZE: usize = 24;

/// Dataset metadata header
///
/// Values above `i64::MAX` read as negative signed integers and are rejected
/// the same way as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[br(big)]
#[bw(big)]
pub struct DatasetHeader {
    /// Number of rows in the dataset
    pub scale: u64,
    /// Number of key fields per row
    pub key_size: u64,
    /// Number of value fields per row
    pub val_size: u64,
}

impl DatasetHeader {
    /// Create a validated header
    pub fn new(scale: u64, key_size: u64, val_size: u64) -> Result<Self> {
        let header = Self {
            scale,
            key_size,
            val_size,
        };
        header.validate()?;
        Ok(header)
    }

    /// Check that every field is strictly positive
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("scale", self.scale),
            ("key_size", self.key_size),
            ("val_size", self.val_size),
        ] {
            let signed = value as i64;
            if signed <= 0 {
                return Err(FormatError::InvalidMetadata {
                    field,
                    value: signed,
                });
            }
        }
        Ok(())
    }

    /// Serialize the header to its 24-byte form
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut bytes = [0u8; HEADER_SIZE];
        self.write(&mut Cursor::new(&mut bytes[..]))?;
        Ok(bytes)
    }

    /// Read and validate a header from the start of `reader`
    ///
    /// Consumes exactly 24 bytes on success.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        let read = read_fully(reader, &mut bytes)?;
        if read != HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                expected: HEADER_SIZE,
                actual: read,
            });
        }

        let header = Self::read(&mut Cursor::new(&bytes))?;
        header.validate()?;
        Ok(header)
    }

    /// Row shape described by this header
    pub fn shape(&self) -> RowShape {
        RowShape::new(self.key_size as usize, self.val_size as usize)
    }

    /// Exact file size for a dataset whose records all have `payload_len` bytes
    pub fn file_size_for_payload(&self, payload_len: u64) -> u64 {
        let record_len = RECORD_HEADER_SIZE as u64 + payload_len;
        (HEADER_SIZE as u64).saturating_add(self.scale.saturating_mul(record_len))
    }
}
