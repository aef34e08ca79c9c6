//! End-to-end tests for dataset generation and bounded loading on real files.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use benchsort::{
    DATA_FILE_NAME, Error, RandomGenerator, SequentialGenerator, ValueGenerator, generate,
    inspect, load_prefix,
};
use benchsort_formats::dataset::HEADER_SIZE;
use benchsort_formats::{Datum, FormatError, Row, RowShape};
use pretty_assertions::assert_eq;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Generator that remembers every row it produced.
struct Recording<G> {
    inner: G,
    shape: RowShape,
    rows: Vec<Row>,
}

impl<G: ValueGenerator> Recording<G> {
    fn new(inner: G, shape: RowShape) -> Self {
        Self {
            inner,
            shape,
            rows: Vec::new(),
        }
    }
}

impl<G: ValueGenerator> ValueGenerator for Recording<G> {
    fn next_datum(&mut self) -> Datum {
        self.inner.next_datum()
    }

    fn next_handle(&mut self) -> i64 {
        self.inner.next_handle()
    }

    fn next_row(&mut self, shape: RowShape) -> Row {
        assert_eq!(shape, self.shape);
        let row = self.inner.next_row(shape);
        self.rows.push(row.clone());
        row
    }
}

fn dataset_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(DATA_FILE_NAME);
    (dir, path)
}

fn truncate(path: &Path, len: u64) {
    OpenOptions::new()
        .write(true)
        .open(path)
        .unwrap()
        .set_len(len)
        .unwrap();
}

#[test]
fn ten_rows_two_keys_one_value() {
    let (_dir, path) = dataset_path();
    let shape = RowShape::new(2, 1);
    let mut generator = Recording::new(RandomGenerator::from_seed(2017), shape);

    let summary = generate(&path, 10, 2, 1, &mut generator).unwrap();
    assert_eq!(summary.rows, 10);

    // Four integer scalars, 9 bytes each
    let payload_len = 4 * Datum::Int(0).encoded_len() as u64;
    assert_eq!(payload_len, 36);

    let info = inspect(&path).unwrap();
    assert_eq!(info.file_size, 24 + 10 * (8 + 36));
    assert_eq!(info.file_size, info.header.file_size_for_payload(payload_len));
    assert_eq!(summary.bytes, info.file_size);

    let rows = load_prefix(&path, 50).unwrap();
    assert_eq!(rows, generator.rows[..5].to_vec());
}

#[test]
fn load_boundaries_and_order() {
    let (_dir, path) = dataset_path();
    let shape = RowShape::new(3, 2);
    let mut generator = Recording::new(SequentialGenerator::default(), shape);
    generate(&path, 37, 3, 2, &mut generator).unwrap();

    assert!(load_prefix(&path, 0).unwrap().is_empty());
    assert_eq!(load_prefix(&path, 100).unwrap(), generator.rows);

    let mut previous = 0;
    for ratio in 0..=100 {
        let rows = load_prefix(&path, ratio).unwrap();
        assert!(rows.len() >= previous, "ratio {ratio} loaded fewer rows");
        assert_eq!(rows.len() as i64, 37 * ratio / 100);
        assert_eq!(rows, generator.rows[..rows.len()].to_vec());
        previous = rows.len();
    }
}

#[test]
fn invalid_ratio_does_not_touch_file() {
    let (_dir, path) = dataset_path();
    // The file does not exist; the ratio error wins
    assert!(matches!(
        load_prefix(&path, 150),
        Err(Error::Format(FormatError::InvalidRatio(150)))
    ));
    assert!(matches!(
        load_prefix(&path, -5),
        Err(Error::Format(FormatError::InvalidRatio(-5)))
    ));
}

#[test]
fn zero_scale_is_invalid_configuration() {
    let (_dir, path) = dataset_path();
    let err = generate(&path, 0, 2, 1, &mut SequentialGenerator::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidConfiguration {
            field: "scale",
            value: 0
        }
    ));
}

#[test]
fn missing_file_is_reported() {
    let (_dir, path) = dataset_path();
    assert!(matches!(
        load_prefix(&path, 10),
        Err(Error::MissingFile { .. })
    ));
    assert!(matches!(inspect(&path), Err(Error::MissingFile { .. })));
}

#[test]
fn short_header_is_truncated_header() {
    let (_dir, path) = dataset_path();
    generate(&path, 4, 1, 1, &mut SequentialGenerator::default()).unwrap();
    truncate(&path, 20);

    let err = load_prefix(&path, 100).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Format(FormatError::TruncatedHeader {
                expected: 24,
                actual: 20
            })
        ),
        "{err:?}"
    );
    assert!(matches!(
        inspect(&path),
        Err(Error::Format(FormatError::TruncatedHeader { .. }))
    ));
}

#[test]
fn mid_record_truncation_fails_the_whole_load() {
    let (_dir, path) = dataset_path();
    generate(&path, 6, 1, 1, &mut SequentialGenerator::default()).unwrap();
    let full = std::fs::metadata(&path).unwrap().len();
    truncate(&path, full - 5);

    let err = load_prefix(&path, 100).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Format(FormatError::TruncatedRecord {
                expected: 27,
                actual: 22
            })
        ),
        "{err:?}"
    );

    // The damaged record lies outside a half load
    assert_eq!(load_prefix(&path, 50).unwrap().len(), 3);
}

#[test]
fn truncation_at_record_boundary_is_truncated_header() {
    let (_dir, path) = dataset_path();
    generate(&path, 3, 1, 1, &mut SequentialGenerator::default()).unwrap();
    truncate(&path, HEADER_SIZE as u64 + 2 * 35);

    let err = load_prefix(&path, 100).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::TruncatedHeader {
            expected: 8,
            actual: 0
        })
    ));
}

#[test]
fn corrupt_metadata_is_rejected_before_rows() {
    let (_dir, path) = dataset_path();
    generate(&path, 3, 1, 1, &mut SequentialGenerator::default()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes[16..24].copy_from_slice(&0u64.to_be_bytes());
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        load_prefix(&path, 0),
        Err(Error::Format(FormatError::InvalidMetadata {
            field: "val_size",
            value: 0
        }))
    ));
}

#[test]
fn regeneration_replaces_previous_dataset() {
    let (_dir, path) = dataset_path();
    generate(&path, 50, 4, 4, &mut SequentialGenerator::default()).unwrap();
    generate(&path, 2, 1, 1, &mut SequentialGenerator::starting_at(100)).unwrap();

    let info = inspect(&path).unwrap();
    assert_eq!(info.header.scale, 2);
    assert_eq!(info.file_size, 24 + 2 * 35);
    assert_eq!(info.file_size, info.header.file_size_for_payload(27));

    let rows = load_prefix(&path, 100).unwrap();
    assert_eq!(rows[0].key, vec![Datum::Int(100)]);
    assert_eq!(rows[1].handle, 105);
}
