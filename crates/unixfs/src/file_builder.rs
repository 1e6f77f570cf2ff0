use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use graphsplit_core::ByteRange;

use crate::block::{Block, BlockStore};
use crate::error::{Error, Result};
use crate::pb::{DataType, PbLink, PbNode, UnixfsData};

/// UnixFS chunk size: 1 MiB leaves (spec.md §4.3).
pub const CHUNK_SIZE: usize = 1 << 20;
/// UnixFS balanced-tree fan-out: at most this many children per internal
/// node (spec.md §4.3, matching `utils.go`'s `UnixfsLinksPerLevel`).
pub const LINKS_PER_LEVEL: usize = 1 << 10;

/// Confines reads to `[start, end]` inclusive of a file, seeking lazily on
/// the first read. Grounded on `utils.go`'s `fileSlice`; unlike the Go
/// version we don't special-case "final read returns EOF in the same
/// call" — `std::io::Read` already tolerates a trailing `Ok(0)` call, so
/// there is nothing to replicate (spec.md §9 Open Question, resolved: the
/// Rust standard `Read` contract makes the distinction moot).
struct RangeReader {
    file: File,
    start: u64,
    remaining: u64,
    seeked: bool,
}

impl RangeReader {
    fn whole_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let size = file
            .metadata()
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        Ok(Self {
            file,
            start: 0,
            remaining: size,
            seeked: true,
        })
    }

    fn ranged(path: &Path, range: ByteRange, size: u64) -> Result<Self> {
        if range.end >= size || range.start > range.end {
            return Err(Error::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                size,
            });
        }
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            start: range.start,
            remaining: range.len(),
            seeked: false,
        })
    }

    fn open(path: &Path, range: Option<ByteRange>, size: u64) -> Result<Self> {
        match range {
            None => Self::whole_file(path),
            Some(r) => Self::ranged(path, r, size),
        }
    }
}

impl Read for RangeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.seeked {
            self.file.seek(SeekFrom::Start(self.start))?;
            self.seeked = true;
        }
        if self.remaining == 0 {
            return Ok(0);
        }
        let want = buf.len().min(self.remaining as usize);
        let n = self.file.read(&mut buf[..want])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

fn read_chunk(reader: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut filled = 0;
    while filled < CHUNK_SIZE {
        let n = reader.read(&mut chunk[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    chunk.truncate(filled);
    Ok(chunk)
}

#[derive(Clone, Copy)]
struct NodeInfo {
    cid: cid::Cid,
    filesize: u64,
    tsize: u64,
}

fn leaf_node(data: Vec<u8>, store: &mut BlockStore) -> NodeInfo {
    let filesize = data.len() as u64;
    let unixfs = UnixfsData {
        kind: DataType::File,
        data,
        filesize: Some(filesize),
        blocksizes: Vec::new(),
    };
    let node = PbNode {
        data: unixfs.encode(),
        links: Vec::new(),
    };
    let encoded = node.encode();
    let tsize = encoded.len() as u64;
    let block = Block::from_dagpb_bytes(encoded);
    let cid = block.cid;
    store.insert(block);
    NodeInfo {
        cid,
        filesize,
        tsize,
    }
}

fn internal_node(children: &[NodeInfo], store: &mut BlockStore) -> NodeInfo {
    let filesize: u64 = children.iter().map(|c| c.filesize).sum();
    let blocksizes: Vec<u64> = children.iter().map(|c| c.filesize).collect();
    let unixfs = UnixfsData {
        kind: DataType::File,
        data: Vec::new(),
        filesize: Some(filesize),
        blocksizes,
    };
    let links: Vec<PbLink> = children
        .iter()
        .map(|c| PbLink {
            hash: c.cid.to_bytes(),
            name: String::new(),
            tsize: c.tsize,
        })
        .collect();
    let node = PbNode {
        data: unixfs.encode(),
        links,
    };
    let encoded = node.encode();
    let own_size = encoded.len() as u64;
    let tsize = own_size + children.iter().map(|c| c.tsize).sum::<u64>();
    let block = Block::from_dagpb_bytes(encoded);
    let cid = block.cid;
    store.insert(block);
    NodeInfo {
        cid,
        filesize,
        tsize,
    }
}

/// Fold a flat layer of nodes into a balanced tree, grouping at most
/// [`LINKS_PER_LEVEL`] children per internal node and promoting layer by
/// layer until a single root remains (spec.md §4.3 step 2).
fn balanced_layout(mut layer: Vec<NodeInfo>, store: &mut BlockStore) -> NodeInfo {
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(LINKS_PER_LEVEL));
        for group in layer.chunks(LINKS_PER_LEVEL) {
            next.push(internal_node(group, store));
        }
        layer = next;
    }
    layer[0]
}

/// Build the UnixFS DAG for one file (or byte range of one), chunking the
/// source into [`CHUNK_SIZE`] leaves and folding them into a balanced tree
/// (spec.md §4.3). Returns the root block's CID and its logical file size.
pub fn build_file_dag(
    path: &Path,
    size: u64,
    range: Option<ByteRange>,
    store: &mut BlockStore,
) -> Result<(cid::Cid, u64, u64)> {
    let mut reader = RangeReader::open(path, range, size)?;
    let mut leaves = Vec::new();
    loop {
        let chunk = read_chunk(&mut reader).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if chunk.is_empty() {
            break;
        }
        let is_last = chunk.len() < CHUNK_SIZE;
        leaves.push(leaf_node(chunk, store));
        if is_last {
            break;
        }
    }
    if leaves.is_empty() {
        // zero-length file: a single empty File leaf is still a valid root.
        leaves.push(leaf_node(Vec::new(), store));
    }
    let root = balanced_layout(leaves, store);
    Ok((root.cid, root.filesize, root.tsize))
}
