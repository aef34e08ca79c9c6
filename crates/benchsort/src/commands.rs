//! Command execution.
//!
//! Each command runs to completion or returns the first error; nothing is
//! retried and partially loaded data is never used.

use crate::config::{Command, GenerateConfig, InfoConfig, RunConfig};
use crate::dataset::{self, DatasetInfo, GenerateSummary};
use crate::error::Result;
use crate::generator::RandomGenerator;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a `run` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows materialized in memory
    pub rows: usize,
}

/// Validate `command`'s options, then run it.
pub fn execute(command: &Command) -> Result<()> {
    command.validate()?;
    match command {
        Command::Generate(config) => generate(config).map(|_| ()),
        Command::Run(config) => run(config).map(|_| ()),
        Command::Info(config) => show_info(config).map(|_| ()),
    }
}

/// Generate a dataset as described by `config`.
///
/// Sizes are still checked by [`dataset::generate`]; the working directory is
/// only checked by [`execute`].
pub fn generate(config: &GenerateConfig) -> Result<GenerateSummary> {
    let path = config.dataset_path();
    let mut generator = config
        .seed
        .map_or_else(RandomGenerator::from_random_seed, RandomGenerator::from_seed);

    info!("Generating...");
    debug!(
        seed = generator.seed(),
        scale = config.scale,
        key_size = config.key_size,
        val_size = config.val_size,
        "generator configured"
    );
    let start = Instant::now();
    let summary = dataset::generate(
        &path,
        config.scale as u64,
        config.key_size as u64,
        config.val_size as u64,
        &mut generator,
    )?;

    info!("Done!");
    info!("Data placed in: {}", summary.path.display());
    info!(
        rows = summary.rows,
        bytes = summary.bytes,
        "Time used: {:?}",
        start.elapsed()
    );
    Ok(summary)
}

/// Load the configured prefix of an existing dataset.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let input_ratio = config.input_ratio()?;
    let output_ratio = config.output_ratio()?;
    debug!(
        buf_size = config.buf_size,
        %output_ratio,
        "sort and export options accepted"
    );

    info!("Loading...");
    let start = Instant::now();
    let rows = dataset::load_prefix(config.dataset_path(), i64::from(input_ratio.percent()))?;

    info!("Done!");
    info!("Time used: {:?}", start.elapsed());
    info!("data size: {}", rows.len());
    Ok(RunSummary { rows: rows.len() })
}

/// Print the header of an existing dataset.
pub fn show_info(config: &InfoConfig) -> Result<DatasetInfo> {
    let info = dataset::inspect(config.dataset_path())?;
    info!(
        "number of rows = {}, key size = {}, value size = {}, file size = {} bytes",
        info.header.scale, info.header.key_size, info.header.val_size, info.file_size
    );
    Ok(info)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn gen_config(dir: &Path, scale: i64, seed: Option<u64>) -> GenerateConfig {
        GenerateConfig {
            dir: dir.to_path_buf(),
            key_size: 2,
            val_size: 1,
            scale,
            seed,
        }
    }

    fn run_config(dir: &Path, input_ratio: i64) -> RunConfig {
        RunConfig {
            dir: dir.to_path_buf(),
            buf_size: 500_000,
            input_ratio,
            output_ratio: 100,
        }
    }

    #[test]
    fn test_generate_then_run() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate(&gen_config(dir.path(), 20, Some(7))).unwrap();
        assert_eq!(summary.rows, 20);

        let run_summary = run(&run_config(dir.path(), 25)).unwrap();
        assert_eq!(run_summary, RunSummary { rows: 5 });

        let info = show_info(&InfoConfig {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();
        assert_eq!(info.header.scale, 20);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        generate(&gen_config(a.path(), 8, Some(99))).unwrap();
        generate(&gen_config(b.path(), 8, Some(99))).unwrap();

        let bytes_a = std::fs::read(a.path().join("data.out")).unwrap();
        let bytes_b = std::fs::read(b.path().join("data.out")).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_run_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(&run_config(dir.path(), 100)),
            Err(Error::MissingFile { .. })
        ));
    }

    #[test]
    fn test_execute_validates_first() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::Generate(gen_config(dir.path(), 0, None));
        assert!(matches!(
            execute(&command),
            Err(Error::Config(ConfigError::NotPositive { option: "scale", .. }))
        ));
        assert!(!dir.path().join("data.out").exists());
    }

    #[test]
    fn test_direct_generate_still_checks_sizes() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            generate(&gen_config(dir.path(), -3, Some(1))),
            Err(Error::InvalidConfiguration {
                field: "scale",
                value: -3
            })
        ));
        assert!(!dir.path().join("data.out").exists());
    }
}
