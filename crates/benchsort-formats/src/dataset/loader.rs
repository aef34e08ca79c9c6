//! Ratio-bounded prefix loading

use super::header::DatasetHeader;
use super::reader::DatasetReader;
use crate::error::{FormatError, Result};
use crate::row::Row;
use std::fmt;
use std::io::Read;

/// Rows reserved up front; larger loads grow the vector as records arrive
const MAX_PREALLOC_ROWS: u64 = 1 << 20;

/// Percentage of a dataset's rows to load, in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ratio(u8);

impl Ratio {
    /// Load no rows
    pub const NONE: Self = Self(0);
    /// Load every row
    pub const ALL: Self = Self(100);

    /// Create a ratio, rejecting values outside `0..=100`
    pub fn new(percent: i64) -> Result<Self> {
        match u8::try_from(percent) {
            Ok(p) if p <= 100 => Ok(Self(p)),
            _ => Err(FormatError::InvalidRatio(percent)),
        }
    }

    /// Percentage value
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Number of rows this ratio selects out of `scale`, rounded down
    ///
    /// Computed exactly in integers, so `29%` of 100 is 29 rows. Scaling by
    /// `ratio as f64 / 100.0` can land just below the whole number and
    /// select one row fewer.
    pub fn rows_of(self, scale: u64) -> u64 {
        (u128::from(scale) * u128::from(self.0) / 100) as u64
    }
}

impl TryFrom<i64> for Ratio {
    type Error = FormatError;

    fn try_from(percent: i64) -> Result<Self> {
        Self::new(percent)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Header and rows produced by a bounded load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// Validated dataset header
    pub header: DatasetHeader,
    /// Loaded prefix, in file order
    pub rows: Vec<Row>,
}

/// Load the first `ratio` percent of the dataset in `reader`
pub fn load<R: Read>(reader: R, ratio: Ratio) -> Result<Vec<Row>> {
    load_with_header(reader, ratio).map(|loaded| loaded.rows)
}

/// Like [`load`], also returning the dataset header
///
/// Records past the selected prefix are never read. Any decode error aborts
/// the load and the rows decoded so far are dropped.
pub fn load_with_header<R: Read>(reader: R, ratio: Ratio) -> Result<LoadedDataset> {
    let mut reader = DatasetReader::new(reader)?;
    let header = *reader.header();
    let total = ratio.rows_of(header.scale);

    let mut rows = Vec::with_capacity(total.min(MAX_PREALLOC_ROWS) as usize);
    for _ in 0..total {
        match reader.next() {
            Some(row) => rows.push(row?),
            None => break,
        }
    }

    Ok(LoadedDataset { header, rows })
}
