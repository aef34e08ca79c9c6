//! Error types for row and dataset file operations
//!
//! Every variant carries enough context (field name, expected and actual
//! byte counts) to diagnose a broken file without re-reading it.

use thiserror::Error;

/// Errors produced while encoding, decoding, writing or loading datasets
#[derive(Error, Debug)]
pub enum FormatError {
    /// A metadata header field is zero or negative
    #[error("Invalid metadata: {field} must be positive, got {value}")]
    InvalidMetadata {
        /// Header field name (`scale`, `key_size` or `val_size`)
        field: &'static str,
        /// Raw value read from the header, as a signed integer
        value: i64,
    },

    /// Fewer bytes than a fixed-size header requires
    #[error("Truncated header: expected {expected} bytes, got {actual} bytes")]
    TruncatedHeader {
        /// Bytes required
        expected: usize,
        /// Bytes available before end of input
        actual: usize,
    },

    /// A record payload is shorter than its declared length
    #[error("Truncated record: expected {expected} payload bytes, got {actual} bytes")]
    TruncatedRecord {
        /// Payload length declared by the record header
        expected: u64,
        /// Bytes available before end of input
        actual: u64,
    },

    /// A record payload does not decode to the expected scalars
    #[error("Malformed record: {reason}")]
    MalformedRecord {
        /// Description of what went wrong
        reason: String,
    },

    /// A row cannot be represented by the record encoding
    #[error("Encoding error: {reason}")]
    Encoding {
        /// Description of what went wrong
        reason: String,
    },

    /// Load ratio outside `0..=100`
    #[error("Invalid ratio: {0} (must be between 0 and 100 inclusive)")]
    InvalidRatio(i64),

    /// Number of records written does not match the header
    #[error("Row count mismatch: header declares {expected} rows, wrote {actual}")]
    RowCountMismatch {
        /// Row count from the header
        expected: u64,
        /// Rows actually written
        actual: u64,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for format operations
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create a malformed record error with a reason
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Create an encoding error with a reason
    pub fn encoding<S: Into<String>>(reason: S) -> Self {
        Self::Encoding {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a corrupt or truncated file
    pub fn is_corruption_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMetadata { .. }
                | Self::TruncatedHeader { .. }
                | Self::TruncatedRecord { .. }
                | Self::MalformedRecord { .. }
        )
    }
}
