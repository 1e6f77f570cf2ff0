//! `Merge`: concatenate `<base>.00000000`, `<base>.00000001`, … part files
//! produced by a mid-file split back into `<base>` (spec.md §4.8).

use std::fs::{self, File};
use std::io::{self};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Error;

const FIRST_PART_SUFFIX: &str = ".00000000";

#[derive(Debug, Default)]
pub struct MergeReport {
    pub merged: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Walk `dir` for every `<base>.00000000` file and merge each base's parts,
/// one independent worker-pool task per base (spec.md §5 "Restoration
/// pool"). Mirrors `retrieve.go`'s `Merge`: each base's own parts are
/// concatenated strictly sequentially by index, which is what makes the
/// result byte-identical to the pre-split file (spec.md §4.8 "Ordering
/// guarantee").
pub fn merge(dir: &Path, parallel: usize) -> crate::error::Result<MergeReport> {
    let first_parts: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.ends_with(FIRST_PART_SUFFIX))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel.max(1))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let results: Vec<(PathBuf, Result<PathBuf, io::Error>)> = pool.install(|| {
        first_parts
            .par_iter()
            .map(|part0| (part0.clone(), merge_one(part0)))
            .collect()
    });

    let mut report = MergeReport::default();
    for (part0, result) in results {
        match result {
            Ok(base) => {
                tracing::info!(merged = %base.display(), "merge complete");
                report.merged.push(base);
            }
            Err(e) => {
                tracing::error!(part = %part0.display(), error = %e, "merge failed");
                report.failed.push((part0, e.to_string()));
            }
        }
    }
    Ok(report)
}

fn merge_one(part0: &Path) -> io::Result<PathBuf> {
    let part0_str = part0.to_string_lossy();
    let base_str = part0_str
        .strip_suffix(FIRST_PART_SUFFIX)
        .expect("caller only passes paths ending in the first-part suffix");
    let base_path = PathBuf::from(base_str);

    let mut out = File::create(&base_path)?;
    let mut index: u32 = 0;
    loop {
        let part_path = PathBuf::from(format!("{base_str}.{index:08}"));
        let mut part = match File::open(&part_path) {
            Ok(f) => f,
            Err(_) => break, // first missing part ends the sequence (spec.md §4.8)
        };
        io::copy(&mut part, &mut out)?;
        drop(part);
        fs::remove_file(&part_path)?;
        index += 1;
    }
    Ok(base_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File as StdFile;
    use std::io::Write;

    #[test]
    fn merges_three_parts_in_order_and_removes_them() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("file2");
        for (i, chunk) in ["AAA", "BBB", "CCC"].iter().enumerate() {
            let part_path = PathBuf::from(format!("{}.{:08}", base.display(), i));
            let mut f = StdFile::create(&part_path).unwrap();
            f.write_all(chunk.as_bytes()).unwrap();
        }

        let report = merge(dir.path(), 2).unwrap();
        assert_eq!(report.merged, vec![base.clone()]);
        assert!(report.failed.is_empty());

        let merged = std::fs::read_to_string(&base).unwrap();
        assert_eq!(merged, "AAABBBCCC");
        assert!(!PathBuf::from(format!("{}.00000000", base.display())).exists());
        assert!(!PathBuf::from(format!("{}.00000002", base.display())).exists());
    }

    #[test]
    fn stops_at_first_missing_part() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("file3");
        StdFile::create(format!("{}.00000000", base.display()))
            .unwrap()
            .write_all(b"only-part")
            .unwrap();
        // no .00000001 written

        let report = merge(dir.path(), 1).unwrap();
        assert_eq!(report.merged, vec![base.clone()]);
        assert_eq!(std::fs::read_to_string(&base).unwrap(), "only-part");
    }
}
