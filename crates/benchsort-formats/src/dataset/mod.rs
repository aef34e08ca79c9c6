//! Dataset file format
//!
//! ```text
//! Dataset File:
//! ├── Header (24 bytes, big-endian)
//! │   ├── scale    (u64) number of records
//! │   ├── key_size (u64) key fields per row
//! │   └── val_size (u64) value fields per row
//! └── Records (scale of them, no padding)
//!     ├── Payload length (u64 big-endian)
//!     └── Payload (key_size + val_size + 1 tagged scalars)
//! ```
//!
//! Files are created once and never modified in place. Readers only discover
//! a short record stream when they reach the missing bytes.
//!
//! # Usage
//!
//! ```rust
//! use benchsort_formats::Datum;
//! use benchsort_formats::Row;
//! use benchsort_formats::dataset::{DatasetHeader, DatasetWriter, Ratio, load};
//!
//! # fn example() -> Result<(), benchsort_formats::FormatError> {
//! let header = DatasetHeader::new(4, 1, 1)?;
//! let mut writer = DatasetWriter::new(Vec::new(), header)?;
//! for n in 0..4 {
//!     writer.write_row(&Row::new(vec![Datum::Int(n)], vec![Datum::Int(n)], n))?;
//! }
//! let bytes = writer.finish()?;
//!
//! let rows = load(bytes.as_slice(), Ratio::new(50)?)?;
//! assert_eq!(rows.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod header;
mod loader;
mod reader;
mod writer;

pub use header::{DatasetHeader, HEADER_SIZE};
pub use loader::{LoadedDataset, Ratio, load, load_with_header};
pub use reader::DatasetReader;
pub use writer::DatasetWriter;
