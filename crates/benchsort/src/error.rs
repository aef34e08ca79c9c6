//! Error types for the benchmark harness.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use benchsort_formats::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// Harness operation errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoding, decoding or validation failure in the dataset format
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Dataset file absent at load time
    #[error("Dataset file does not exist: {}", path.display())]
    MissingFile {
        /// Path that was opened
        path: PathBuf,
    },

    /// Non-positive dataset dimension supplied to generation
    #[error("Invalid configuration: {field} must be positive, got {value}")]
    InvalidConfiguration {
        /// Offending parameter (`scale`, `key_size` or `val_size`)
        field: &'static str,
        /// Value supplied
        value: i64,
    },

    /// Command-line configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to open, create or write a dataset file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Non-positive size, scale or buffer option
    #[error("Invalid {option}: must be positive, got {value}")]
    NotPositive {
        /// Option name as given on the command line
        option: &'static str,
        /// Value supplied
        value: i64,
    },

    /// Ratio option outside `0..=100`
    #[error("Invalid {option}: must be between 0 and 100 (inclusive), got {value}")]
    InvalidRatio {
        /// Option name as given on the command line
        option: &'static str,
        /// Value supplied
        value: i64,
    },

    /// Working directory does not exist
    #[error("Working directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Working directory path is not a directory
    #[error("Working directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;
