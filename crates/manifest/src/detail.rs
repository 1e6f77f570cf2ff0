//! Builds the `detail` column's `fsNode` tree (spec.md §6): `{name, hash,
//! size, link: [...]}`, recursively describing a slice's UnixFS layout.

use cid::Cid;
use graphsplit_unixfs::pb::{PbNode, UnixfsData};
use graphsplit_unixfs::BlockStore;
use serde::Serialize;

use crate::error::{Error, Result};

/// One node in a slice's directory/file tree, as embedded in the manifest's
/// `detail` JSON column. `hash` is the node's CIDv0 string; `size` is the
/// UnixFS-recorded logical size (a file's byte length, or a directory's
/// cumulative subtree `Tsize`).
#[derive(Debug, Clone, Serialize)]
pub struct FsNode {
    pub name: String,
    pub hash: String,
    pub size: u64,
    pub link: Vec<FsNode>,
}

/// Walk the block store from `root` and build its `FsNode` tree, naming the
/// top node `root_name` (the slice's graph name for a directory root, or the
/// bare file name for a single-file slice).
pub fn build_fs_detail(root_name: &str, root: Cid, store: &BlockStore) -> Result<FsNode> {
    build_node(root_name.to_string(), root, store)
}

fn build_node(name: String, cid: Cid, store: &BlockStore) -> Result<FsNode> {
    let data = store.get(&cid).ok_or(Error::MissingBlock(cid))?;
    let node = PbNode::decode(data)?;
    let unixfs = UnixfsData::decode(&node.data)?;

    let size = unixfs.filesize.unwrap_or_else(|| {
        node.links.iter().map(|l| l.tsize).sum()
    });

    let mut children = Vec::with_capacity(node.links.len());
    for link in &node.links {
        let child_cid =
            Cid::try_from(link.hash.clone()).map_err(|e| Error::MalformedCid(e.to_string()))?;
        children.push(build_node(link.name.clone(), child_cid, store)?);
    }

    Ok(FsNode {
        name,
        hash: cid.to_string(),
        size,
        link: children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsplit_core::{FileRef, SlicePlan};

    #[test]
    fn single_file_detail_has_no_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello").unwrap();
        let plan = SlicePlan {
            entries: vec![FileRef {
                path,
                name: "a.txt".to_string(),
                size: 5,
                range: None,
            }],
        };
        let (store, root) = graphsplit_unixfs::build_slice_dag(&plan, None, true, 1).unwrap();
        let detail = build_fs_detail("a.txt", root.cid, &store).unwrap();
        assert_eq!(detail.name, "a.txt");
        assert_eq!(detail.size, 5);
        assert!(detail.link.is_empty());
    }

    #[test]
    fn directory_detail_nests_its_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"aaaa").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"bb").unwrap();
        let plan = SlicePlan {
            entries: vec![
                FileRef {
                    path: dir.path().join("a.txt"),
                    name: "a.txt".to_string(),
                    size: 4,
                    range: None,
                },
                FileRef {
                    path: dir.path().join("b.txt"),
                    name: "b.txt".to_string(),
                    size: 2,
                    range: None,
                },
            ],
        };
        let (store, root) = graphsplit_unixfs::build_slice_dag(&plan, Some(dir.path()), false, 1).unwrap();
        let detail = build_fs_detail("", root.cid, &store).unwrap();
        assert_eq!(detail.link.len(), 2);
        assert_eq!(detail.link[0].name, "a.txt");
        assert_eq!(detail.link[0].size, 4);
        assert_eq!(detail.link[1].name, "b.txt");
        assert_eq!(detail.link[1].size, 2);

        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"name\":\"a.txt\""));
    }
}
