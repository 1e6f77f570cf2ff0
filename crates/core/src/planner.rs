use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::model::{ByteRange, FileRef, SlicePlan};

/// Turns a stream of whole-file [`FileRef`]s into a stream of [`SlicePlan`]s
/// no larger than `slice_size`, splitting files that straddle a slice
/// boundary. Implements the exact three-way branch in `chunk.go`'s `Chunk`
/// loop (spec.md §4.2), including its "first cut" / "following cut" split.
pub struct SlicePlanner<I> {
    files: I,
    slice_size: u64,
    cumu: u64,
    current: Vec<FileRef>,
    buffered: VecDeque<SlicePlan>,
    files_exhausted: bool,
}

impl<I> SlicePlanner<I>
where
    I: Iterator<Item = Result<FileRef>>,
{
    pub fn new(files: I, slice_size: u64) -> Result<Self> {
        if slice_size == 0 {
            return Err(Error::ZeroSliceSize);
        }
        Ok(Self {
            files,
            slice_size,
            cumu: 0,
            current: Vec::new(),
            buffered: VecDeque::new(),
            files_exhausted: false,
        })
    }

    fn flush_current(&mut self) {
        let entries = std::mem::take(&mut self.current);
        tracing::debug!(
            entries = entries.len(),
            bytes = self.cumu,
            "slice plan complete"
        );
        self.buffered.push_back(SlicePlan { entries });
        self.cumu = 0;
    }

    fn process(&mut self, file: FileRef) {
        let z = file.size;
        let s = self.slice_size;

        if self.cumu + z < s {
            self.cumu += z;
            self.current.push(file);
            return;
        }
        if self.cumu + z == s {
            self.cumu += z;
            self.current.push(file);
            self.flush_current();
            return;
        }

        // cumu + z > s: split `file` across one or more slices.
        let mut file_slice_count: u32 = 0;
        let first_cut = s - self.cumu;
        let seek_start: u64 = 0;
        let mut seek_end: u64 = seek_start + first_cut - 1;
        self.current.push(FileRef {
            path: file.path.clone(),
            name: format!("{}.{file_slice_count:08}", file.name),
            size: file.size,
            range: Some(ByteRange {
                start: seek_start,
                end: seek_end,
            }),
        });
        file_slice_count += 1;
        self.flush_current();

        let file_size = file.size;
        while seek_end < file_size - 1 {
            let next_start = seek_end + 1;
            let mut next_end = next_start + s - 1;
            if next_end >= file_size - 1 {
                next_end = file_size - 1;
            }
            self.cumu += next_end - next_start + 1;
            self.current.push(FileRef {
                path: file.path.clone(),
                name: format!("{}.{file_slice_count:08}", file.name),
                size: file.size,
                range: Some(ByteRange {
                    start: next_start,
                    end: next_end,
                }),
            });
            file_slice_count += 1;
            seek_end = next_end;
            if next_end - next_start == s - 1 {
                self.flush_current();
            }
        }
    }
}

impl<I> Iterator for SlicePlanner<I>
where
    I: Iterator<Item = Result<FileRef>>,
{
    type Item = Result<SlicePlan>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slice) = self.buffered.pop_front() {
                return Some(Ok(slice));
            }
            if self.files_exhausted {
                return None;
            }
            match self.files.next() {
                None => {
                    self.files_exhausted = true;
                    if self.cumu > 0 {
                        self.flush_current();
                    }
                }
                Some(Err(e)) => {
                    self.files_exhausted = true;
                    return Some(Err(e));
                }
                Some(Ok(file)) => self.process(file),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> FileRef {
        FileRef {
            path: format!("/tmp/{name}").into(),
            name: name.to_string(),
            size,
            range: None,
        }
    }

    #[test]
    fn two_files_exact_fill() {
        // spec.md §8: 600 + 600 bytes at S=1000 -> slice 1 holds file a
        // whole plus a 400-byte head of b, slice 2 holds the 200-byte tail.
        let files = vec![Ok(file("a", 600)), Ok(file("b", 600))];
        let slices: Vec<SlicePlan> = SlicePlanner::new(files.into_iter(), 1000)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].total_len(), 1000);
        assert_eq!(slices[1].total_len(), 200);
        assert_eq!(slices[0].entries[1].name, "b.00000000");
        assert_eq!(slices[1].entries[0].name, "b.00000001");
    }

    #[test]
    fn three_slices_from_one_big_file() {
        // 5000 bytes at S=2000 -> three slices of 2000, 2000, 1000.
        let files = vec![Ok(file("big", 5000))];
        let slices: Vec<SlicePlan> = SlicePlanner::new(files.into_iter(), 2000)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let lens: Vec<u64> = slices.iter().map(SlicePlan::total_len).collect();
        assert_eq!(lens, vec![2000, 2000, 1000]);
    }

    #[test]
    fn exact_multiple_closes_slice_without_trailing_empty() {
        let files = vec![Ok(file("a", 1000))];
        let slices: Vec<SlicePlan> = SlicePlanner::new(files.into_iter(), 1000)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].total_len(), 1000);
    }

    #[test]
    fn zero_slice_size_rejected() {
        let files: Vec<Result<FileRef>> = vec![];
        assert!(matches!(
            SlicePlanner::new(files.into_iter(), 0),
            Err(Error::ZeroSliceSize)
        ));
    }
}
