use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("protobuf encoding error: {0}")]
    Protobuf(String),

    #[error("unknown UnixFS DataType discriminant {0}")]
    UnknownDataType(u32),

    #[error("byte range [{start},{end}] is out of bounds for a {size}-byte file")]
    RangeOutOfBounds { start: u64, end: u64, size: u64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("block {0} referenced by a link is missing from the store")]
    MissingBlock(cid::Cid),
}

pub type Result<T> = std::result::Result<T, Error>;
