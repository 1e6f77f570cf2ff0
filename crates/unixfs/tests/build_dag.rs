use std::fs;

use graphsplit_core::{FileRef, SlicePlan};
use graphsplit_unixfs::build_slice_dag;

#[test]
fn single_small_file_root_has_no_directory_wrapper() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("only.txt");
    fs::write(&path, b"hello world").unwrap();

    let plan = SlicePlan {
        entries: vec![FileRef {
            path: path.clone(),
            name: "only.txt".to_string(),
            size: 11,
            range: None,
        }],
    };

    let (store, root) = build_slice_dag(&plan, None, true, 2).unwrap();
    assert!(store.contains(&root.cid));
    assert_eq!(store.len(), 1);
}

#[test]
fn directory_of_two_files_gets_two_links() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"aaaa").unwrap();
    fs::write(dir.path().join("b.txt"), b"bb").unwrap();

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

    let (store, root) = build_slice_dag(&plan, Some(dir.path()), false, 2).unwrap();
    assert!(store.contains(&root.cid));
    // root directory block + two file leaf blocks
    assert_eq!(store.len(), 3);
}

#[test]
fn large_file_spanning_multiple_chunks_builds_balanced_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let size = (1 << 20) * 3 + 500;
    fs::write(&path, vec![7u8; size]).unwrap();

    let plan = SlicePlan {
        entries: vec![FileRef {
            path: path.clone(),
            name: "big.bin".to_string(),
            size: size as u64,
            range: None,
        }],
    };

    let (store, root) = build_slice_dag(&plan, None, true, 2).unwrap();
    assert!(store.contains(&root.cid));
    // 4 leaves (3 full + 1 short) plus one internal root node.
    assert_eq!(store.len(), 5);
}
