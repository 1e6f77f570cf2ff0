//! Manifest CSV writer and fs-detail tree builder for `graphsplit`.
//!
//! Every completed slice appends one row to `<car-dir>/manifest.csv`
//! recording its payload CID, filename, and `detail` tree, plus piece
//! commitment fields when CommP was computed (spec.md §6).

pub mod detail;
pub mod error;
pub mod writer;

pub use detail::{build_fs_detail, FsNode};
pub use error::{Error, Result};
pub use writer::ManifestWriter;
