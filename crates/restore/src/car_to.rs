//! `CarTo`: load one or more CAR files and reconstruct their UnixFS trees
//! on disk (spec.md §4.8).

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cid::Cid;
use graphsplit_unixfs::pb::{DataType, PbNode, UnixfsData};
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Outcome of a `CarTo` run: restore errors are per-CAR and non-fatal to the
/// rest of the batch (spec.md §7: "logged and the CAR is skipped; a
/// best-effort policy, not transactional").
#[derive(Debug, Default)]
pub struct CarToReport {
    pub restored: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Collect every `.car` file under `car_path` (or `car_path` itself, if it
/// is already a single CAR file), mirroring `retrieve.go`'s `CarTo`
/// `filepath.Walk`.
fn find_car_files(car_path: &Path) -> Vec<PathBuf> {
    if car_path.is_file() {
        return vec![car_path.to_path_buf()];
    }
    walkdir::WalkDir::new(car_path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "car"))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Load every CAR under `car_path` and reconstruct its tree beneath
/// `output_dir`, using a worker pool bounded by `parallel` — one independent
/// unit of work per CAR file (spec.md §5 "Restoration pool").
pub fn car_to(car_path: &Path, output_dir: &Path, parallel: usize) -> Result<CarToReport> {
    let files = find_car_files(car_path);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel.max(1))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let results: Vec<(PathBuf, Result<()>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path.clone(), restore_one(path, output_dir)))
            .collect()
    });

    let mut report = CarToReport::default();
    for (path, result) in results {
        match result {
            Ok(()) => {
                tracing::info!(car = %path.display(), "restored");
                report.restored.push(path);
            }
            Err(e) => {
                tracing::error!(car = %path.display(), error = %e, "restore failed");
                report.failed.push((path, e.to_string()));
            }
        }
    }
    Ok(report)
}

fn restore_one(car_path: &Path, output_dir: &Path) -> Result<()> {
    let mut file = File::open(car_path)?;
    let (root, car) = graphsplit_car::read_single_root_car(&mut file)?;
    let store: HashMap<Cid, Vec<u8>> = car.blocks.into_iter().collect();
    write_node(root, output_dir, &store)
}

fn write_node(cid: Cid, out_path: &Path, store: &HashMap<Cid, Vec<u8>>) -> Result<()> {
    let data = store.get(&cid).ok_or(Error::MissingBlock(cid))?;
    let node = PbNode::decode(data)?;
    let unixfs = UnixfsData::decode(&node.data)?;
    match unixfs.kind {
        DataType::Directory => {
            fs::create_dir_all(out_path)?;
            for link in &node.links {
                let child_cid =
                    Cid::try_from(link.hash.clone()).map_err(|e| Error::MalformedCid(e.to_string()))?;
                write_node(child_cid, &out_path.join(&link.name), store)?;
            }
            Ok(())
        }
        DataType::Symlink => {
            let target = String::from_utf8(unixfs.data)?;
            write_symlink(&target, out_path)
        }
        DataType::File | DataType::Raw => {
            let file = File::create(out_path)?;
            let mut writer = BufWriter::new(file);
            write_file_bytes(&node, &mut writer, store)?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// Stream a file node's bytes to `writer` by walking its chunk tree
/// depth-first in link order, matching the order the DAG builder chunked
/// the source in (spec.md §4.3, §4.8 "Regular file").
fn write_file_bytes(
    node: &PbNode,
    writer: &mut impl Write,
    store: &HashMap<Cid, Vec<u8>>,
) -> Result<()> {
    if node.links.is_empty() {
        let unixfs = UnixfsData::decode(&node.data)?;
        writer.write_all(&unixfs.data)?;
        return Ok(());
    }
    for link in &node.links {
        let child_cid =
            Cid::try_from(link.hash.clone()).map_err(|e| Error::MalformedCid(e.to_string()))?;
        let data = store.get(&child_cid).ok_or(Error::MissingBlock(child_cid))?;
        let child = PbNode::decode(data)?;
        write_file_bytes(&child, writer, store)?;
    }
    Ok(())
}

#[cfg(unix)]
fn write_symlink(target: &str, out_path: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, out_path)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_symlink(target: &str, out_path: &Path) -> Result<()> {
    Err(Error::UnsupportedSymlink {
        path: out_path.to_path_buf(),
        target: target.to_string(),
    })
}
