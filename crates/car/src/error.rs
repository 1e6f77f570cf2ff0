use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode CAR header: {0}")]
    HeaderEncode(String),

    #[error("failed to decode CAR header: {0}")]
    HeaderDecode(String),

    #[error("CAR header declares version {0}, only version 1 is supported")]
    UnsupportedVersion(u64),

    #[error("CAR file has {0} roots, expected exactly one")]
    RootCountMismatch(usize),

    #[error("block frame length {0} is implausibly large")]
    FrameTooLarge(u64),

    #[error("truncated CAR stream: expected {expected} more bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("malformed CID in block frame: {0}")]
    MalformedCid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
