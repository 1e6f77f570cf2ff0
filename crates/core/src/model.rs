use std::path::PathBuf;

/// An inclusive byte range `[start, end]` within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by this range.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// A candidate bytes contribution to a slice: either a whole file or a
/// byte-range slice of one, per spec.md §3.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileRef {
    /// Absolute path to the backing file on disk.
    pub path: PathBuf,
    /// Display name used inside the CAR's directory tree. For a range-split
    /// file this carries the `<original>.<00000000+i>` suffix (spec.md §4.2).
    pub name: String,
    /// Total size of the file on disk, independent of `range`.
    pub size: u64,
    /// `None` for a whole-file contribution, `Some(range)` for a mid-file
    /// split. Invariant: `0 <= start <= end <= size - 1`.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub range: Option<ByteRange>,
}

impl FileRef {
    /// Number of bytes this `FileRef` contributes to its slice.
    #[must_use]
    pub fn contributed_len(&self) -> u64 {
        self.range.map_or(self.size, |r| r.len())
    }

    /// Whether this `FileRef` is a partial, range-split view of its file.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.range.is_some()
    }
}

/// An ordered list of `FileRef`s whose contributed lengths sum to `<= S`
/// (spec.md §3). Slices are built up incrementally by the planner and
/// consumed whole by the DAG builder.
#[derive(Debug, Clone, Default)]
pub struct SlicePlan {
    pub entries: Vec<FileRef>,
}

impl SlicePlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of contributed bytes across all entries.
    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.entries.iter().map(FileRef::contributed_len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
