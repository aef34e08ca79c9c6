//! File-level dataset operations.
//!
//! These wrap the streaming writer and bounded loader from
//! `benchsort-formats` with file handling: truncate-and-rewrite on generation,
//! read-only access on load, and path context on every failure.

use crate::error::{Error, Result};
use crate::generator::ValueGenerator;
use benchsort_formats::dataset::{self, DatasetHeader, DatasetWriter, Ratio};
use benchsort_formats::{FormatError, Row};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Name of the dataset file inside the working directory.
pub const DATA_FILE_NAME: &str = "data.out";

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// File that was written
    pub path: PathBuf,
    /// Rows written
    pub rows: u64,
    /// Bytes written, header included
    pub bytes: u64,
}

/// Header-only view of a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Validated header
    pub header: DatasetHeader,
    /// Size of the file on disk
    pub file_size: u64,
}

/// Write a fresh dataset of `scale` rows to `path`.
///
/// Any existing file at `path` is truncated. Rows are streamed to disk as
/// they are generated.
pub fn generate<P, G>(
    path: P,
    scale: u64,
    key_size: u64,
    val_size: u64,
    generator: &mut G,
) -> Result<GenerateSummary>
where
    P: AsRef<Path>,
    G: ValueGenerator + ?Sized,
{
    let path = path.as_ref();
    for (field, value) in [
        ("scale", scale),
        ("key_size", key_size),
        ("val_size", val_size),
    ] {
        let signed = value as i64;
        if signed <= 0 {
            return Err(Error::InvalidConfiguration {
                field,
                value: signed,
            });
        }
    }
    let header = DatasetHeader::new(scale, key_size, val_size)?;

    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer =
        DatasetWriter::new(BufWriter::new(file), header).map_err(|e| with_path(path, e))?;

    let shape = header.shape();
    for _ in 0..scale {
        let row = generator.next_row(shape);
        writer.write_row(&row).map_err(|e| with_path(path, e))?;
    }

    let rows = writer.rows_written();
    let bytes = writer.bytes_written();
    writer.finish().map_err(|e| with_path(path, e))?;

    tracing::debug!(path = %path.display(), rows, bytes, "dataset written");
    Ok(GenerateSummary {
        path: path.to_path_buf(),
        rows,
        bytes,
    })
}

/// Load the first `ratio` percent of the rows stored at `path`.
///
/// The ratio is checked before the file is touched.
pub fn load_prefix<P: AsRef<Path>>(path: P, ratio: i64) -> Result<Vec<Row>> {
    let ratio = Ratio::new(ratio)?;
    let path = path.as_ref();
    let file = open_existing(path)?;

    let loaded = dataset::load_with_header(BufReader::new(file), ratio)?;
    tracing::debug!(
        path = %path.display(),
        scale = loaded.header.scale,
        key_size = loaded.header.key_size,
        val_size = loaded.header.val_size,
        %ratio,
        rows = loaded.rows.len(),
        "loaded dataset prefix"
    );
    Ok(loaded.rows)
}

/// Read and validate only the header of the dataset at `path`.
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<DatasetInfo> {
    let path = path.as_ref();
    let mut file = open_existing(path)?;
    let file_size = file
        .metadata()
        .map_err(|source| io_error(path, source))?
        .len();
    let header = DatasetHeader::read_from(&mut file)?;

    Ok(DatasetInfo { header, file_size })
}

fn open_existing(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            Error::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            io_error(path, source)
        }
    })
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Attach the file path to raw I/O failures from the writer
fn with_path(path: &Path, error: FormatError) -> Error {
    match error {
        FormatError::Io(source) => io_error(path, source),
        other => other.into(),
    }
}
