use std::path::PathBuf;

/// Top-level CLI error: wraps every crate's own error type so `main` has a
/// single `Display` to print to stderr (spec.md §7 "the core returns errors
/// up to the slice controller, which invokes the callback's `OnError`").
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] graphsplit_core::Error),

    #[error(transparent)]
    Unixfs(#[from] graphsplit_unixfs::error::Error),

    #[error(transparent)]
    Car(#[from] graphsplit_car::Error),

    #[error(transparent)]
    Commp(#[from] graphsplit_commp::Error),

    #[error(transparent)]
    Restore(#[from] graphsplit_restore::Error),

    #[error(transparent)]
    Manifest(#[from] graphsplit_manifest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path:?} already exists; refusing to overwrite (rename collision)")]
    RenameCollision { path: PathBuf },

    #[error("{0} is not a CAR file")]
    NotACarFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
