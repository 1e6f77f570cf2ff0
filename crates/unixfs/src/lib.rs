//! UnixFS DAG construction: chunked file trees, directory assembly and the
//! per-slice content-addressed block store (spec.md §4.3, §4.4, §3 Block).

pub mod block;
pub mod dir;
pub mod error;
pub mod file_builder;
pub mod pb;

use std::path::Path;

use cid::Cid;
use graphsplit_core::SlicePlan;
use rayon::prelude::*;

pub use block::{reachable_order, Block, BlockStore};
pub use dir::{dir_components, ChildInfo, DirectoryAssembler};
pub use error::{Error, Result};

/// Build a whole slice's UnixFS DAG: every file's chunked tree in parallel,
/// then the directory tree sequentially over the completed file roots
/// (spec.md §4.7 steps 2-3). Returns the populated block store and the
/// slice root's identity.
///
/// `root_is_single_file` covers spec.md §4.4's edge case: when the whole
/// run's input was a single file (not a directory), the slice root *is*
/// that file's own root node, with no enclosing directory wrapper.
pub fn build_slice_dag(
    plan: &SlicePlan,
    parent_path: Option<&Path>,
    root_is_single_file: bool,
    parallel: usize,
) -> Result<(BlockStore, ChildInfo)> {
    let threads = parallel.max(1).min(
        std::thread::available_parallelism()
            .map(std::num::NonZero::get)
            .unwrap_or(1),
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let built: Vec<(graphsplit_core::FileRef, ChildInfo, BlockStore)> = pool.install(|| {
        plan.entries
            .par_iter()
            .map(|file_ref| -> Result<_> {
                let mut local_store = BlockStore::new();
                let (cid, _filesize, tsize) = file_builder::build_file_dag(
                    &file_ref.path,
                    file_ref.size,
                    file_ref.range,
                    &mut local_store,
                )?;
                Ok((file_ref.clone(), ChildInfo { cid, tsize }, local_store))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    if root_is_single_file && built.len() == 1 {
        let (_, info, store) = built.into_iter().next().expect("checked len == 1");
        return Ok((store, info));
    }

    let mut store = BlockStore::new();
    let mut assembler = DirectoryAssembler::new();
    for (file_ref, info, local_store) in built {
        for (cid, data) in local_store.iter() {
            store.insert(Block {
                cid: *cid,
                data: data.to_vec(),
            });
        }
        let components = file_ref
            .path
            .parent()
            .map(|dir| dir_components(dir, parent_path))
            .unwrap_or_default();
        assembler.attach(components, file_ref.name.clone(), info);
    }
    let root = assembler.finish(&mut store);
    Ok((store, root))
}

/// Convenience accessor matching the spec's naming for a slice's payload
/// CID — the root block's own CID.
#[must_use]
pub fn payload_cid(root: &ChildInfo) -> Cid {
    root.cid
}
