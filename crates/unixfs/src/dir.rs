use std::path::Path;

use cid::Cid;
use indexmap::IndexMap;

use crate::block::{Block, BlockStore};
use crate::pb::{DataType, PbLink, PbNode, UnixfsData};

/// A built file node's identity as seen by its parent directory: CID,
/// logical filesize (informational at the directory level), and `Tsize`
/// (cumulative encoded size of its subtree, used for link accounting).
#[derive(Debug, Clone, Copy)]
pub struct ChildInfo {
    pub cid: Cid,
    pub tsize: u64,
}

enum Entry {
    File(ChildInfo),
    Dir(DirNode),
}

/// An in-memory directory tree keyed by path component, built up one file
/// at a time and only serialized to DAG-PB once every file has been
/// attached (spec.md §4.4). Grounded on `utils.go`'s `dirNodeMap`/`getDirKey`
/// walk, restructured as an owned tree instead of a flat
/// `dirKey -> ProtoNode` map plus repeated `UpdateNodeLink` calls — both
/// produce the same final link set, but the tree avoids re-encoding a
/// directory's protobuf bytes on every sibling insert.
#[derive(Default)]
struct DirNode {
    // IndexMap preserves insertion order; later inserts under the same
    // name replace the value in place (spec.md §4.4: "If a link of that
    // name already exists on the parent, update... it").
    children: IndexMap<String, Entry>,
}

impl DirNode {
    fn insert(&mut self, components: &[String], name: String, info: ChildInfo) {
        match components.split_first() {
            None => {
                self.children.insert(name, Entry::File(info));
            }
            Some((head, rest)) => match self.children.entry(head.clone()) {
                indexmap::map::Entry::Occupied(mut e) => match e.get_mut() {
                    Entry::Dir(dir) => dir.insert(rest, name, info),
                    Entry::File(_) => {
                        let mut dir = DirNode::default();
                        dir.insert(rest, name, info);
                        e.insert(Entry::Dir(dir));
                    }
                },
                indexmap::map::Entry::Vacant(e) => {
                    let mut dir = DirNode::default();
                    dir.insert(rest, name, info);
                    e.insert(Entry::Dir(dir));
                }
            },
        }
    }
}

fn encode_dir(node: &DirNode, store: &mut BlockStore) -> ChildInfo {
    let mut links = Vec::with_capacity(node.children.len());
    let mut child_tsize_total = 0u64;
    for (name, entry) in &node.children {
        let info = match entry {
            Entry::File(info) => *info,
            Entry::Dir(dir) => encode_dir(dir, store),
        };
        child_tsize_total += info.tsize;
        links.push(PbLink {
            hash: info.cid.to_bytes(),
            name: name.clone(),
            tsize: info.tsize,
        });
    }
    let unixfs = UnixfsData {
        kind: DataType::Directory,
        data: Vec::new(),
        filesize: None,
        blocksizes: Vec::new(),
    };
    let pb = PbNode {
        data: unixfs.encode(),
        links,
    };
    let encoded = pb.encode();
    let own_size = encoded.len() as u64;
    let block = Block::from_dagpb_bytes(encoded);
    let cid = block.cid;
    store.insert(block);
    ChildInfo {
        cid,
        tsize: own_size + child_tsize_total,
    }
}

/// Strip `parent_path` (if it prefixes `dir`) from a file's containing
/// directory and split the remainder into path components. Mirrors
/// `utils.go`'s literal string-prefix stripping rather than
/// `Path::strip_prefix`'s component-boundary semantics, since the original
/// treats both sides as plain strings.
#[must_use]
pub fn dir_components(dir: &Path, parent_path: Option<&Path>) -> Vec<String> {
    let mut dir_str = dir.to_string_lossy().into_owned();
    if let Some(parent) = parent_path {
        let parent_str = parent.to_string_lossy();
        if dir_str.starts_with(parent_str.as_ref()) {
            dir_str = dir_str[parent_str.len()..].to_string();
        }
    }
    if let Some(stripped) = dir_str.strip_prefix('/') {
        dir_str = stripped.to_string();
    }
    if dir_str.is_empty() {
        Vec::new()
    } else {
        dir_str.split('/').map(str::to_string).collect()
    }
}

/// Assembles a slice's directory tree from its files' `(components, name,
/// ChildInfo)` triples, returning the slice root's CID. Building one file
/// at a time and serializing only at the end (depth-first, post-order)
/// keeps intermediate directory protobufs from being re-encoded on every
/// insert, unlike `utils.go`'s incremental `UpdateNodeLink` walk.
#[derive(Default)]
pub struct DirectoryAssembler {
    root: DirNode,
}

impl DirectoryAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, components: Vec<String>, name: String, info: ChildInfo) {
        self.root.insert(&components, name, info);
    }

    /// Serialize the whole tree bottom-up and return the root's identity.
    #[must_use]
    pub fn finish(self, store: &mut BlockStore) -> ChildInfo {
        encode_dir(&self.root, store)
    }
}
