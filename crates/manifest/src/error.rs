#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write manifest row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode fs-detail JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode UnixFS node while building fs-detail: {0}")]
    Unixfs(#[from] graphsplit_unixfs::error::Error),

    #[error("block {0} referenced by a link is missing from the store")]
    MissingBlock(cid::Cid),

    #[error("malformed CID in link: {0}")]
    MalformedCid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
