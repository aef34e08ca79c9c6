//! Row records
//!
//! A record is an 8-byte big-endian payload length followed by the payload:
//! the key scalars, the value scalars, then the handle as an `Int` scalar.
//!
//! ```text
//! [u64 BE: L][key[0] .. key[k-1]][val[0] .. val[v-1]][Int(handle)]
//!            |<------------------------ L bytes ----------------->|
//! ```

use crate::datum::{self, Datum};
use crate::error::{FormatError, Result};
use std::io::{ErrorKind, Read};

/// Size of the length prefix ahead of every record payload
pub const RECORD_HEADER_SIZE: usize = 8;

/// Upper bound on the payload buffer reserved before any bytes are read,
/// so a corrupt length cannot force a huge allocation
const MAX_PREALLOC: u64 = 64 * 1024;

/// Key and value field counts shared by every row in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    /// Number of key fields
    pub key_size: usize,
    /// Number of value fields
    pub val_size: usize,
}

impl RowShape {
    /// Create a shape with the given field counts
    pub const fn new(key_size: usize, val_size: usize) -> Self {
        Self { key_size, val_size }
    }

    /// Scalars per record: keys, values and the handle
    pub const fn scalar_count(&self) -> usize {
        self.key_size.saturating_add(self.val_size).saturating_add(1)
    }
}

/// One benchmark row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Ordered key fields
    pub key: Vec<Datum>,
    /// Ordered value fields
    pub val: Vec<Datum>,
    /// Auxiliary row identifier
    pub handle: i64,
}

impl Row {
    /// Create a row from its parts
    pub fn new(key: Vec<Datum>, val: Vec<Datum>, handle: i64) -> Self {
        Self { key, val, handle }
    }

    /// Shape of this row
    pub fn shape(&self) -> RowShape {
        RowShape::new(self.key.len(), self.val.len())
    }

    /// Payload length of this row's record, excluding the length prefix
    pub fn payload_len(&self) -> usize {
        self.key
            .iter()
            .chain(&self.val)
            .map(Datum::encoded_len)
            .sum::<usize>()
            + Datum::Int(self.handle).encoded_len()
    }

    /// Encode this row as a complete record
    pub fn encode(&self, shape: RowShape) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(RECORD_HEADER_SIZE + self.payload_len());
        self.encode_into(shape, &mut buf)?;
        Ok(buf)
    }

    /// Append this row's record to `buf`
    ///
    /// On error `buf` is left as it was before the call.
    pub fn encode_into(&self, shape: RowShape, buf: &mut Vec<u8>) -> Result<()> {
        if self.key.len() != shape.key_size {
            return Err(FormatError::encoding(format!(
                "key has {} fields, dataset expects {}",
                self.key.len(),
                shape.key_size
            )));
        }
        if self.val.len() != shape.val_size {
            return Err(FormatError::encoding(format!(
                "value has {} fields, dataset expects {}",
                self.val.len(),
                shape.val_size
            )));
        }

        let start = buf.len();
        buf.extend_from_slice(&[0u8; RECORD_HEADER_SIZE]);

        let handle = Datum::Int(self.handle);
        for datum in self.key.iter().chain(&self.val).chain([&handle]) {
            if let Err(e) = datum.encode_into(buf) {
                buf.truncate(start);
                return Err(e);
            }
        }

        let payload_len = (buf.len() - start - RECORD_HEADER_SIZE) as u64;
        buf[start..start + RECORD_HEADER_SIZE].copy_from_slice(&payload_len.to_be_bytes());
        Ok(())
    }

    /// Decode one record from `reader`
    ///
    /// Consumes exactly the length prefix plus the payload it declares.
    pub fn decode<R: Read>(reader: &mut R, shape: RowShape) -> Result<Self> {
        let mut head = [0u8; RECORD_HEADER_SIZE];
        let read = read_fully(reader, &mut head)?;
        if read != RECORD_HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                expected: RECORD_HEADER_SIZE,
                actual: read,
            });
        }

        let payload_len = u64::from_be_bytes(head);
        let mut payload = Vec::with_capacity(payload_len.min(MAX_PREALLOC) as usize);
        let mut limited = reader.by_ref().take(payload_len);
        let read = limited.read_to_end(&mut payload)? as u64;
        if read != payload_len {
            return Err(FormatError::TruncatedRecord {
                expected: payload_len,
                actual: read,
            });
        }

        tracing::trace!(payload_len, "decoded record payload");
        Self::from_payload(&payload, shape)
    }

    /// Rebuild a row from a record payload (without its length prefix)
    pub fn from_payload(payload: &[u8], shape: RowShape) -> Result<Self> {
        let expected = shape.scalar_count();
        let mut values = datum::decode_all(payload, expected)?;
        if values.len() != expected {
            return Err(FormatError::malformed(format!(
                "expected {expected} scalars, decoded {}",
                values.len()
            )));
        }

        let handle = match values.pop() {
            Some(Datum::Int(handle)) => handle,
            Some(other) => {
                return Err(FormatError::malformed(format!(
                    "handle must be an integer scalar, got tag {:#04x}",
                    other.flag()
                )));
            }
            None => return Err(FormatError::malformed("record has no handle")),
        };
        let val = values.split_off(shape.key_size);

        Ok(Self {
            key: values,
            val,
            handle,
        })
    }
}

/// Read until `buf` is full or the reader is exhausted, returning the count
pub(crate) fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
