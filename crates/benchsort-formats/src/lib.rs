//! Data representation for external sort benchmarks
//!
#![allow(clippy::cast_possible_wrap)] // Header fields are checked as signed values
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
//! This crate defines how benchmark rows are encoded, how a dataset file is
//! laid out on disk, and how a percentage-bounded prefix of a dataset is
//! loaded back into memory.
//!
//! - [`datum`]: tagged scalars with an ordered, self-describing encoding
//! - [`row`]: length-prefixed row records
//! - [`dataset`]: the 24-byte header, streaming writer/reader and bounded loader
//!
//! Everything here is synchronous and generic over [`std::io::Read`] and
//! [`std::io::Write`]; file handling lives in the `benchsort` crate.

pub mod dataset;
pub mod datum;
pub mod error;
pub mod row;

pub use dataset::{DatasetHeader, DatasetReader, DatasetWriter, Ratio};
pub use datum::Datum;
pub use error::{FormatError, Result};
pub use row::{Row, RowShape};
