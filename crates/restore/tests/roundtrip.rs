use std::fs;

use graphsplit_core::{FileRef, SlicePlan};
use graphsplit_unixfs::{build_slice_dag, reachable_order};

fn write_slice_car(plan: &SlicePlan, parent: Option<&std::path::Path>, single_file: bool) -> (std::path::PathBuf, tempfile::TempDir) {
    let (store, root) = build_slice_dag(plan, parent, single_file, 2).unwrap();
    let order = reachable_order(root.cid, &store).unwrap();
    let blocks = order
        .into_iter()
        .map(|cid| (cid, store.get(&cid).unwrap().to_vec()));

    let mut buf = Vec::new();
    graphsplit_car::write_car(vec![root.cid], blocks, &mut buf).unwrap();

    let car_dir = tempfile::tempdir().unwrap();
    let car_path = car_dir.path().join("slice.car");
    fs::write(&car_path, buf).unwrap();
    (car_path, car_dir)
}

#[test]
fn restores_a_single_file_byte_identical() {
    let input_dir = tempfile::tempdir().unwrap();
    let path = input_dir.path().join("only.txt");
    fs::write(&path, b"A".repeat(500)).unwrap();

    let plan = SlicePlan {
        entries: vec![FileRef {
            path: path.clone(),
            name: "only.txt".to_string(),
            size: 500,
            range: None,
        }],
    };
    let (car_path, _car_dir) = write_slice_car(&plan, None, true);

    // A single-file slice's root *is* the file node (spec.md §3 "Slice
    // Root"), so the output path passed to `car_to` is the exact path the
    // restored file is written to, not a pre-existing directory to recurse
    // into -- matching `retrieve.go`'s `NodeWriteTo(file, outputDir)`.
    let output_root = tempfile::tempdir().unwrap();
    let output_path = output_root.path().join("restored.txt");
    let report = graphsplit_restore::car_to::car_to(&car_path, &output_path, 2).unwrap();
    assert!(report.failed.is_empty());
    assert_eq!(report.restored.len(), 1);

    assert_eq!(fs::read(&output_path).unwrap(), b"A".repeat(500));
}

#[test]
fn restores_a_directory_tree_and_merges_split_parts() {
    let input_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(input_dir.path().join("sub")).unwrap();
    fs::write(input_dir.path().join("sub/a.txt"), b"hello").unwrap();

    let plan = SlicePlan {
        entries: vec![FileRef {
            path: input_dir.path().join("sub/a.txt"),
            name: "a.txt".to_string(),
            size: 5,
            range: None,
        }],
    };
    let (car_path, _car_dir) = write_slice_car(&plan, Some(input_dir.path()), false);

    let output_dir = tempfile::tempdir().unwrap();
    let report = graphsplit_restore::car_to::car_to(&car_path, output_dir.path(), 1).unwrap();
    assert!(report.failed.is_empty());

    let restored = fs::read_to_string(output_dir.path().join("sub/a.txt")).unwrap();
    assert_eq!(restored, "hello");
}

#[test]
fn merges_part_files_produced_by_a_mid_file_split() {
    let output_dir = tempfile::tempdir().unwrap();
    let base = output_dir.path().join("big.bin");
    fs::write(format!("{}.00000000", base.display()), b"first-half-").unwrap();
    fs::write(format!("{}.00000001", base.display()), b"second-half").unwrap();

    let report = graphsplit_restore::merge::merge(output_dir.path(), 2).unwrap();
    assert_eq!(report.merged, vec![base.clone()]);
    assert_eq!(
        fs::read_to_string(&base).unwrap(),
        "first-half-second-half"
    );
    assert!(!std::path::Path::new(&format!("{}.00000000", base.display())).exists());
}
