//! Streaming dataset writer

use super::header::{DatasetHeader, HEADER_SIZE};
use crate::error::{FormatError, Result};
use crate::row::{Row, RowShape};
use std::io::Write;

/// Writes a dataset file one record at a time
///
/// The header goes out when the writer is created; each row is encoded and
/// appended to the sink immediately, so memory use does not grow with the
/// dataset. Wrap file sinks in a `BufWriter`.
#[derive(Debug)]
pub struct DatasetWriter<W: Write> {
    inner: W,
    header: DatasetHeader,
    shape: RowShape,
    rows_written: u64,
    bytes_written: u64,
    scratch: Vec<u8>,
}

impl<W: Write> DatasetWriter<W> {
    /// Validate `header` and write it to `inner`
    pub fn new(mut inner: W, header: DatasetHeader) -> Result<Self> {
        header.validate()?;
        inner.write_all(&header.to_bytes()?)?;

        Ok(Self {
            inner,
            header,
            shape: header.shape(),
            rows_written: 0,
            bytes_written: HEADER_SIZE as u64,
            scratch: Vec::new(),
        })
    }

    /// Encode `row` and append it to the dataset
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if self.rows_written >= self.header.scale {
            return Err(FormatError::RowCountMismatch {
                expected: self.header.scale,
                actual: self.rows_written + 1,
            });
        }

        self.scratch.clear();
        row.encode_into(self.shape, &mut self.scratch)?;
        self.inner.write_all(&self.scratch)?;

        self.rows_written += 1;
        self.bytes_written += self.scratch.len() as u64;
        Ok(())
    }

    /// Header this writer was created with
    pub fn header(&self) -> &DatasetHeader {
        &self.header
    }

    /// Rows appended so far
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Bytes written so far, header included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush the sink and return it
    ///
    /// Fails if fewer rows were written than the header declares.
    pub fn finish(mut self) -> Result<W> {
        if self.rows_written != self.header.scale {
            return Err(FormatError::RowCountMismatch {
                expected: self.header.scale,
                actual: self.rows_written,
            });
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::datum::Datum;
    use pretty_assertions::assert_eq;

    fn row(n: i64) -> Row {
        Row::new(vec![Datum::Int(n)], vec![Datum::Int(n * 10)], n)
    }

    #[test]
    fn test_writes_header_then_records() {
        let header = DatasetHeader::new(2, 1, 1).unwrap();
        let mut writer = DatasetWriter::new(Vec::new(), header).unwrap();
        assert_eq!(writer.bytes_written(), 24);

        writer.write_row(&row(1)).unwrap();
        writer.write_row(&row(2)).unwrap();
        assert_eq!(writer.rows_written(), 2);

        let expected_len = writer.bytes_written();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes.len() as u64, expected_len);
        assert_eq!(bytes.len() as u64, header.file_size_for_payload(27));
        assert_eq!(&bytes[..24], &header.to_bytes().unwrap());
    }

    #[test]
    fn test_rejects_extra_rows() {
        let header = DatasetHeader::new(1, 1, 1).unwrap();
        let mut writer = DatasetWriter::new(Vec::new(), header).unwrap();
        writer.write_row(&row(1)).unwrap();

        let err = writer.write_row(&row(2)).unwrap_err();
        assert!(matches!(
            err,
            FormatError::RowCountMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert_eq!(writer.rows_written(), 1);
    }

    #[test]
    fn test_finish_requires_all_rows() {
        let header = DatasetHeader::new(3, 1, 1).unwrap();
        let mut writer = DatasetWriter::new(Vec::new(), header).unwrap();
        writer.write_row(&row(1)).unwrap();

        assert!(matches!(
            writer.finish(),
            Err(FormatError::RowCountMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_shape_is_enforced() {
        let header = DatasetHeader::new(1, 2, 1).unwrap();
        let mut writer = DatasetWriter::new(Vec::new(), header).unwrap();
        assert!(matches!(
            writer.write_row(&row(1)),
            Err(FormatError::Encoding { .. })
        ));
        assert_eq!(writer.rows_written(), 0);
        assert_eq!(writer.bytes_written(), 24);
    }
}
