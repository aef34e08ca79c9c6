//! Tagged scalar values and their ordered, self-describing encoding
//!
//! Every scalar is written as a one-byte tag followed by its payload, so a
//! payload can be decoded without a schema. Encodings of two values with the
//! same tag compare bytewise in the same order as the values themselves.
//!
//! ```text
//! Null  : 0x00
//! Bytes : 0x01 [8 data bytes][marker]...   marker = 0xFF - padding
//! Int   : 0x03 [u64 BE of value ^ i64::MIN]
//! Uint  : 0x04 [u64 BE]
//! Float : 0x05 [u64 BE of bits, sign set if >= 0, all inverted if < 0]
//! ```

use crate::error::{FormatError, Result};
use std::fmt;

/// Tag for [`Datum::Null`]
pub const NULL_FLAG: u8 = 0x00;
/// Tag for [`Datum::Bytes`]
pub const BYTES_FLAG: u8 = 0x01;
/// Tag for [`Datum::Int`]
pub const INT_FLAG: u8 = 0x03;
/// Tag for [`Datum::Uint`]
pub const UINT_FLAG: u8 = 0x04;
/// Tag for [`Datum::Float`]
pub const FLOAT_FLAG: u8 = 0x05;

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Data bytes per group in the bytes encoding
const GROUP_SIZE: usize = 8;
/// Marker for a completely filled group
const GROUP_MARKER: u8 = 0xFF;

/// A single tagged scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// Absent value
    Null,
    /// Signed 64-bit integer
    Int(i64),
    /// Unsigned 64-bit integer
    Uint(u64),
    /// 64-bit float (NaN is not representable)
    Float(f64),
    /// Raw byte string
    Bytes(Vec<u8>),
}

impl Datum {
    /// Tag byte written ahead of this value's payload
    pub fn flag(&self) -> u8 {
        match self {
            Self::Null => NULL_FLAG,
            Self::Int(_) => INT_FLAG,
            Self::Uint(_) => UINT_FLAG,
            Self::Float(_) => FLOAT_FLAG,
            Self::Bytes(_) => BYTES_FLAG,
        }
    }

    /// Get the value if this is a signed integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of bytes [`Datum::encode_into`] appends for this value
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Null => 1,
            Self::Int(_) | Self::Uint(_) | Self::Float(_) => 9,
            Self::Bytes(data) => 1 + (data.len() / GROUP_SIZE + 1) * (GROUP_SIZE + 1),
        }
    }

    /// Append the tag and payload of this value to `buf`
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.push(self.flag());
        match self {
            Self::Null => {}
            Self::Int(v) => buf.extend_from_slice(&((*v as u64) ^ SIGN_MASK).to_be_bytes()),
            Self::Uint(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::Float(v) => {
                if v.is_nan() {
                    return Err(FormatError::encoding("NaN float values are not encodable"));
                }
                let bits = v.to_bits();
                let ordered = if bits & SIGN_MASK == 0 {
                    bits | SIGN_MASK
                } else {
                    !bits
                };
                buf.extend_from_slice(&ordered.to_be_bytes());
            }
            Self::Bytes(data) => encode_bytes(buf, data),
        }
        Ok(())
    }

    /// Decode one value from the front of `data`, advancing the slice past it
    pub fn decode_from(data: &mut &[u8]) -> Result<Self> {
        let (&flag, rest) = (*data)
            .split_first()
            .ok_or_else(|| FormatError::malformed("missing scalar tag"))?;
        *data = rest;

        match flag {
            NULL_FLAG => Ok(Self::Null),
            INT_FLAG => Ok(Self::Int((take_u64(data)? ^ SIGN_MASK) as i64)),
            UINT_FLAG => Ok(Self::Uint(take_u64(data)?)),
            FLOAT_FLAG => {
                let ordered = take_u64(data)?;
                let bits = if ordered & SIGN_MASK == 0 {
                    !ordered
                } else {
                    ordered & !SIGN_MASK
                };
                Ok(Self::Float(f64::from_bits(bits)))
            }
            BYTES_FLAG => decode_bytes(data).map(Self::Bytes),
            other => Err(FormatError::malformed(format!(
                "unknown scalar tag {other:#04x}"
            ))),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bytes(data) => {
                for byte in data {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Datum {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for Datum {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Decode every scalar in `data`
///
/// Fails once more than `expected` scalars are present. Fewer is not an error
/// here; callers compare the returned length against the count they need.
pub fn decode_all(mut data: &[u8], expected: usize) -> Result<Vec<Datum>> {
    // Every scalar takes at least one byte
    let mut values = Vec::with_capacity(expected.min(data.len()));
    while !data.is_empty() {
        if values.len() == expected {
            return Err(FormatError::malformed(format!(
                "expected {expected} scalars, payload has {} more bytes",
                data.len()
            )));
        }
        values.push(Datum::decode_from(&mut data)?);
    }
    Ok(values)
}

fn take_u64(data: &mut &[u8]) -> Result<u64> {
    if data.len() < 8 {
        return Err(FormatError::malformed(format!(
            "scalar payload needs 8 bytes, got {}",
            data.len()
        )));
    }
    let (head, rest) = (*data).split_at(8);
    *data = rest;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(head);
    Ok(u64::from_be_bytes(bytes))
}

fn encode_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    buf.reserve((data.len() / GROUP_SIZE + 1) * (GROUP_SIZE + 1));
    let mut chunks = data.chunks_exact(GROUP_SIZE);
    for chunk in &mut chunks {
        buf.extend_from_slice(chunk);
        buf.push(GROUP_MARKER);
    }

    // The last group is always partial, possibly empty
    let tail = chunks.remainder();
    let pad = GROUP_SIZE - tail.len();
    buf.extend_from_slice(tail);
    buf.resize(buf.len() + pad, 0);
    buf.push(GROUP_MARKER - pad as u8);
}

fn decode_bytes(data: &mut &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        if data.len() < GROUP_SIZE + 1 {
            return Err(FormatError::malformed(format!(
                "bytes group needs {} bytes, got {}",
                GROUP_SIZE + 1,
                data.len()
            )));
        }
        let (group, rest) = (*data).split_at(GROUP_SIZE + 1);
        *data = rest;

        let marker = group[GROUP_SIZE];
        let pad = usize::from(GROUP_MARKER - marker);
        if pad > GROUP_SIZE {
            return Err(FormatError::malformed(format!(
                "invalid bytes group marker {marker:#04x}"
            )));
        }

        let real = GROUP_SIZE - pad;
        out.extend_from_slice(&group[..real]);
        if pad != 0 {
            if group[real..GROUP_SIZE].iter().any(|&b| b != 0) {
                return Err(FormatError::malformed("non-zero bytes group padding"));
            }
            return Ok(out);
        }
    }
}
