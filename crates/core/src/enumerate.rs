use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::FileRef;

/// Depth-first, non-sorting file-tree walk.
///
/// Mirrors `utils.go`'s `GetFileListAsync`: each directory's children are
/// fully drained (recursively) before the walk resumes with the next
/// sibling, entries are taken in whatever order the filesystem reports them
/// (never sorted — the planner's determinism across runs depends on this),
/// and any entry whose basename starts with `.` is skipped, including a
/// hidden root itself.
pub struct FileEnumerator {
    stack: Vec<std::vec::IntoIter<PathBuf>>,
}

impl FileEnumerator {
    /// Start a walk rooted at `paths`, taken in the given order.
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            stack: vec![paths.into_iter()],
        }
    }

    fn next_inner(&mut self) -> Result<Option<FileRef>> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };
            let Some(path) = frame.next() else {
                self.stack.pop();
                continue;
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.starts_with('.') {
                continue;
            }
            let meta = fs::symlink_metadata(&path).map_err(|source| {
                tracing::warn!(path = %path.display(), %source, "failed to stat path");
                Error::Enumeration {
                    path: path.clone(),
                    source,
                }
            })?;
            if meta.is_symlink() {
                // Symlinks and other special files are not emitted by the
                // enumerator; the restorer is the only place that writes
                // them back (spec.md §4.1, §4.8).
                continue;
            }
            if meta.is_dir() {
                tracing::debug!(dir = %path.display(), "descending into directory");
                let mut children = Vec::new();
                let entries = fs::read_dir(&path).map_err(|source| Error::Enumeration {
                    path: path.clone(),
                    source,
                })?;
                for entry in entries {
                    let entry = entry.map_err(|source| Error::Enumeration {
                        path: path.clone(),
                        source,
                    })?;
                    children.push(entry.path());
                }
                self.stack.push(children.into_iter());
                continue;
            }
            if !meta.is_file() {
                // Other special files (fifos, sockets, devices) are not
                // emitted by the enumerator either (spec.md §4.1).
                continue;
            }
            tracing::trace!(path = %path.display(), size = meta.len(), "enumerated file");
            return Ok(Some(FileRef {
                path: path.clone(),
                name,
                size: meta.len(),
                range: None,
            }));
        }
    }

    /// Sum of the sizes of every regular file reachable from `paths`,
    /// without yielding the files themselves. Grounded on `GetGraphCount`'s
    /// preliminary `GetFileList` pass.
    pub fn total_bytes(paths: Vec<PathBuf>) -> Result<u64> {
        let mut total = 0u64;
        let mut walker = Self::new(paths);
        while let Some(file) = walker.next() {
            total += file?.size;
        }
        Ok(total)
    }
}

impl Iterator for FileEnumerator {
    type Item = Result<FileRef>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_inner().transpose()
    }
}

/// Resolve a single CLI input argument (file or directory) into the list of
/// root paths handed to [`FileEnumerator`]. `spec.md` §6 takes one
/// positional `<input>`; this still accepts it as a one-element root list
/// since the enumerator itself is list-based (matching `utils.go`, which
/// always operates over `[]string`).
#[must_use]
pub fn roots(input: &Path) -> Vec<PathBuf> {
    vec![input.to_path_buf()]
}
