use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error reading CommP input: {0}")]
    Io(#[from] io::Error),

    #[error("failed to construct piece multihash: {0}")]
    Multihash(String),

    #[error(
        "padded size computed from the Fr32 bitstream ({from_bits}) disagrees with the size \
         computed from the declared payload length ({from_payload})"
    )]
    PaddedSizeMismatch { from_bits: u64, from_payload: u64 },

    #[error("CAR buffer is already {current} bytes, larger than the {target}-byte pad target")]
    AlreadyLargerThanTarget { current: u64, target: u64 },

    #[error("not a CAR file: {0}")]
    NotACarFile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
