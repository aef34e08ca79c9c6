//! Streaming dataset reader

use super::header::DatasetHeader;
use crate::error::Result;
use crate::row::{Row, RowShape};
use std::io::Read;

/// Sequential reader over the records of a dataset file
///
/// The header is read and validated on construction; no record is decoded
/// before that. Iteration yields at most `scale` rows and stops for good
/// after the first error.
#[derive(Debug)]
pub struct DatasetReader<R: Read> {
    inner: R,
    header: DatasetHeader,
    shape: RowShape,
    remaining: u64,
}

impl<R: Read> DatasetReader<R> {
    /// Read the header from `inner`
    pub fn new(mut inner: R) -> Result<Self> {
        let header = DatasetHeader::read_from(&mut inner)?;
        Ok(Self {
            inner,
            header,
            shape: header.shape(),
            remaining: header.scale,
        })
    }

    /// Validated dataset header
    pub fn header(&self) -> &DatasetHeader {
        &self.header
    }

    /// Records not yet read, according to the header
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Return the underlying reader, positioned after the last record read
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for DatasetReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match Row::decode(&mut self.inner, self.shape) {
            Ok(row) => {
                self.remaining -= 1;
                Some(Ok(row))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining).ok())
    }
}
