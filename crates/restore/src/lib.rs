//! Inverse pipeline for graphsplit: load CAR file(s), reconstruct the
//! UnixFS tree on disk, and reassemble files split across slices
//! (spec.md §4.8).

pub mod car_to;
pub mod error;
pub mod merge;

pub use car_to::{car_to, CarToReport};
pub use error::{Error, Result};
pub use merge::{merge, MergeReport};

use std::path::PathBuf;

/// Configuration for the `restore` command (spec.md §6).
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    pub car_path: PathBuf,
    pub output_dir: PathBuf,
    pub parallel: usize,
}

/// Run both restore phases in sequence: load every CAR under `car_path` into
/// `output_dir` (`CarTo`), then reassemble any split part files left behind
/// (`Merge`). Matches the CLI's `restore` subcommand (spec.md §6).
///
/// `output_dir` is not created ahead of time -- `retrieve.go`'s `CarTo`
/// doesn't either, it's `NodeWriteTo`'s own `Directory` branch that `mkdir`s
/// it lazily. A single-file-root CAR instead treats `output_dir` as the
/// literal destination file path, so pre-creating it as a directory would
/// break that case.
pub fn restore(config: &RestoreConfig) -> Result<(CarToReport, MergeReport)> {
    let car_report = car_to::car_to(&config.car_path, &config.output_dir, config.parallel)?;
    let merge_report = merge::merge(&config.output_dir, config.parallel)?;
    Ok((car_report, merge_report))
}
