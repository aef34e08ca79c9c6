//! Command-line configuration.
//!
//! Options come from CLI arguments, `BENCHSORT_*` environment variables, or
//! their defaults. Numeric options are parsed as signed integers so that
//! out-of-range input reaches [`Command::validate`] and gets a descriptive
//! error instead of a parse failure.
//!
//! # Example
//!
//! ```no_run
//! use benchsort::Cli;
//!
//! let cli = Cli::from_args();
//! cli.command.validate().expect("Invalid configuration");
//! ```

use crate::dataset::DATA_FILE_NAME;
use crate::error::ConfigError;
use benchsort_formats::Ratio;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Top-level command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "benchsort",
    about = "Generate and load datasets for external sort benchmarks",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }
}

/// Benchmark harness commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate rows
    #[command(name = "gen")]
    Generate(GenerateConfig),
    /// Load rows for a benchmark run
    Run(RunConfig),
    /// Show the header of an existing dataset
    Info(InfoConfig),
}

impl Command {
    /// Validate the selected command's options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Generate(config) => config.validate(),
            Self::Run(config) => config.validate(),
            Self::Info(config) => check_directory(&config.dir),
        }
    }
}

/// Options for `benchsort gen`.
#[derive(Debug, Clone, Args)]
pub struct GenerateConfig {
    /// Where to store the generated rows
    #[arg(long, env = "BENCHSORT_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Number of key fields per row
    #[arg(
        long,
        env = "BENCHSORT_KEY_SIZE",
        default_value_t = 8,
        allow_negative_numbers = true,
    )]
    pub key_size: i64,

    /// Number of value fields per row
    #[arg(
        long,
        env = "BENCHSORT_VAL_SIZE",
        default_value_t = 8,
        allow_negative_numbers = true,
    )]
    pub val_size: i64,

    /// How many rows to generate
    #[arg(
        long,
        env = "BENCHSORT_SCALE",
        default_value_t = 100,
        allow_negative_numbers = true,
    )]
    pub scale: i64,

    /// Seed for the value generator (random when omitted)
    #[arg(long, env = "BENCHSORT_SEED")]
    pub seed: Option<u64>,
}

impl GenerateConfig {
    /// Check sizes and the working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - key size, value size or scale is not positive
    /// - the working directory doesn't exist or isn't a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("key-size", self.key_size)?;
        check_positive("val-size", self.val_size)?;
        check_positive("scale", self.scale)?;
        check_directory(&self.dir)
    }

    /// Path of the dataset file.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }
}

/// Options for `benchsort run`.
#[derive(Debug, Clone, Args)]
pub struct RunConfig {
    /// Where to load the generated rows from
    #[arg(long, env = "BENCHSORT_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// How many rows are held in memory at a time by the sort phase
    #[arg(
        long,
        env = "BENCHSORT_BUF_SIZE",
        default_value_t = 500_000,
        allow_negative_numbers = true,
    )]
    pub buf_size: i64,

    /// Percentage of the dataset to load
    #[arg(
        long,
        env = "BENCHSORT_INPUT_RATIO",
        default_value_t = 100,
        allow_negative_numbers = true,
    )]
    pub input_ratio: i64,

    /// Percentage of the sorted output to export
    #[arg(
        long,
        env = "BENCHSORT_OUTPUT_RATIO",
        default_value_t = 100,
        allow_negative_numbers = true,
    )]
    pub output_ratio: i64,
}

impl RunConfig {
    /// Check buffer size, both ratios and the working directory.
    ///
    /// The output ratio is validated even though only the sort/export phase
    /// would use it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("buf-size", self.buf_size)?;
        check_ratio("input-ratio", self.input_ratio)?;
        check_ratio("output-ratio", self.output_ratio)?;
        check_directory(&self.dir)
    }

    /// Validated input ratio.
    pub fn input_ratio(&self) -> Result<Ratio, ConfigError> {
        check_ratio("input-ratio", self.input_ratio)
    }

    /// Validated output ratio.
    pub fn output_ratio(&self) -> Result<Ratio, ConfigError> {
        check_ratio("output-ratio", self.output_ratio)
    }

    /// Path of the dataset file.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }
}

/// Options for `benchsort info`.
#[derive(Debug, Clone, Args)]
pub struct InfoConfig {
    /// Directory holding the dataset
    #[arg(long, env = "BENCHSORT_DIR", default_value = ".")]
    pub dir: PathBuf,
}

impl InfoConfig {
    /// Path of the dataset file.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }
}

fn check_positive(option: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive { option, value });
    }
    Ok(())
}

fn check_ratio(option: &'static str, value: i64) -> Result<Ratio, ConfigError> {
    Ratio::new(value).map_err(|_| ConfigError::InvalidRatio { option, value })
}

fn check_directory(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        return Err(ConfigError::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ConfigError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}
