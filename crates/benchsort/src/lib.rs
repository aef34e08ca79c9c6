//! External sort benchmark harness.
//!
//! This crate prepares data for sort benchmarks and loads it back:
//! - `gen`: write a synthetic dataset of key/value/handle rows
//! - `run`: load a percentage-bounded prefix of that dataset into memory
//! - `info`: report a dataset's header without decoding rows
//!
//! The on-disk format, row codec and bounded loader live in
//! `benchsort-formats`; this crate adds file handling, value generation,
//! configuration and logging.
//!
//! # Architecture
//!
//! - `config`: CLI/environment configuration and validation
//! - `dataset`: file-level generate, load and inspect operations
//! - `generator`: pluggable value generators
//! - `commands`: command execution with timing and logging
//!
//! # Example
//!
//! ```no_run
//! use benchsort::{SequentialGenerator, generate, load_prefix};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut generator = SequentialGenerator::default();
//!     generate("data.out", 10, 2, 1, &mut generator)?;
//!
//!     let rows = load_prefix("data.out", 50)?;
//!     assert_eq!(rows.len(), 5);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;

pub use config::{Cli, Command, GenerateConfig, InfoConfig, RunConfig};
pub use dataset::{DATA_FILE_NAME, DatasetInfo, GenerateSummary, generate, inspect, load_prefix};
pub use error::{ConfigError, Error, Result};
pub use generator::{RandomGenerator, SequentialGenerator, ValueGenerator};
