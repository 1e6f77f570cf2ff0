use std::fs;
use std::io::Cursor;

use graphsplit_car::{read_single_root_car, write_car};
use graphsplit_unixfs::{build_slice_dag, reachable_order};

#[test]
fn writes_and_reads_back_a_single_file_slice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, b"hello graphsplit").unwrap();

    let plan = graphsplit_core::SlicePlan {
        entries: vec![graphsplit_core::FileRef {
            path: path.clone(),
            name: "hello.txt".to_string(),
            size: 16,
            range: None,
        }],
    };
    let (store, root) = build_slice_dag(&plan, None, true, 1).unwrap();
    let order = reachable_order(root.cid, &store).unwrap();
    let blocks = order
        .into_iter()
        .map(|cid| (cid, store.get(&cid).unwrap().to_vec()));

    let mut buf = Vec::new();
    write_car(vec![root.cid], blocks, &mut buf).unwrap();

    let mut cursor = Cursor::new(buf);
    let (decoded_root, car) = read_single_root_car(&mut cursor).unwrap();
    assert_eq!(decoded_root, root.cid);
    assert_eq!(car.blocks.len(), store.len());
    assert!(car.blocks.iter().any(|(cid, _)| *cid == root.cid));
}

#[test]
fn reads_a_car_padded_with_the_add_padding_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, b"hello graphsplit").unwrap();

    let plan = graphsplit_core::SlicePlan {
        entries: vec![graphsplit_core::FileRef {
            path,
            name: "hello.txt".to_string(),
            size: 16,
            range: None,
        }],
    };
    let (store, root) = build_slice_dag(&plan, None, true, 1).unwrap();
    let order = reachable_order(root.cid, &store).unwrap();
    let blocks = order
        .into_iter()
        .map(|cid| (cid, store.get(&cid).unwrap().to_vec()));

    let mut buf = Vec::new();
    write_car(vec![root.cid], blocks, &mut buf).unwrap();
    let unpadded_len = buf.len();
    let target = unpadded_len as u64 + 64;
    graphsplit_commp::pad_car(&mut buf, target).unwrap();
    assert_eq!(buf.len() as u64, target);

    let mut cursor = Cursor::new(buf);
    let (decoded_root, car) = read_single_root_car(&mut cursor).unwrap();
    assert_eq!(decoded_root, root.cid);
    assert_eq!(car.blocks.len(), store.len());
}
