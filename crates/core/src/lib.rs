//! Data model, file enumeration and slice planning for graphsplit.
//!
//! This crate implements the filesystem-facing half of the pipeline: it
//! walks an input tree, groups its files into byte-bounded slices (mid-file
//! splits included), and hands each slice's plan off to the UnixFS/CAR/CommP
//! crates for DAG construction.

pub mod enumerate;
pub mod error;
pub mod model;
pub mod naming;
pub mod planner;

pub use enumerate::{roots, FileEnumerator};
pub use error::{Error, Result};
pub use model::{ByteRange, FileRef, SlicePlan};
pub use naming::{gen_graph_name, slice_count_estimate};
pub use planner::SlicePlanner;

/// Configuration shared by the `chunk` pipeline (spec.md §6). Validated up
/// front so malformed input fails before any I/O is attempted (spec.md §7).
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    pub slice_size: u64,
    pub parallel: usize,
    pub graph_name: String,
    pub parent_path: Option<std::path::PathBuf>,
    pub car_dir: std::path::PathBuf,
    pub save_manifest: bool,
    pub calc_commp: bool,
    pub rename: bool,
    pub add_padding: bool,
}

impl ChunkConfig {
    /// Validate the configuration, mirroring `Chunk`'s own guard clauses
    /// (`sliceSize == 0`, `parallel <= 0`) plus the ambient check that
    /// `car_dir` actually exists.
    pub fn validate(&self) -> Result<()> {
        if self.slice_size == 0 {
            return Err(Error::ZeroSliceSize);
        }
        if self.parallel == 0 {
            return Err(Error::InvalidParallelism(0));
        }
        if !self.car_dir.is_dir() {
            return Err(Error::CarDirMissing(self.car_dir.clone()));
        }
        if self.add_padding && !self.calc_commp {
            return Err(Error::PaddingRequiresCommp);
        }
        Ok(())
    }
}
