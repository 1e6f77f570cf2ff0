use std::io;
use std::path::PathBuf;

/// Errors surfaced while enumerating a file tree or planning slices.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `slice_size` was zero; a slice of zero bytes can never contain a file.
    #[error("slice size must be greater than zero")]
    ZeroSliceSize,

    /// `parallel` was zero or negative.
    #[error("parallel worker count must be at least 1, got {0}")]
    InvalidParallelism(i64),

    /// The configured CAR output directory does not exist or is not a directory.
    #[error("car-dir {0:?} does not exist or is not a directory")]
    CarDirMissing(PathBuf),

    /// `add_padding` was requested without `calc_commp`: there is no piece
    /// to pad to without first computing its CommP (spec.md §6 "after
    /// CommP is computed").
    #[error("--add-padding requires --calc-commp")]
    PaddingRequiresCommp,

    /// Traversal hit an unreadable directory or a failed `stat`. Per spec.md
    /// §4.1/§7, enumeration errors are fatal for the whole run.
    #[error("failed to read {path:?}: {source}")]
    Enumeration { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
