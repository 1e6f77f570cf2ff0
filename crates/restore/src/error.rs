use std::path::PathBuf;

use cid::Cid;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read CAR: {0}")]
    Car(#[from] graphsplit_car::Error),

    #[error("failed to decode UnixFS node: {0}")]
    Unixfs(#[from] graphsplit_unixfs::error::Error),

    #[error("block {0} referenced by a link is not present in this CAR")]
    MissingBlock(Cid),

    #[error("malformed CID in link: {0}")]
    MalformedCid(String),

    #[error("symlink target is not valid UTF-8: {0}")]
    InvalidSymlinkTarget(#[from] std::string::FromUtf8Error),

    #[error("symlinks are not supported on this platform: {path:?} -> {target}")]
    UnsupportedSymlink { path: PathBuf, target: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, Error>;
