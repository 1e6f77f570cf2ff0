use std::io::Write;

use cid::Cid;
use integer_encoding::VarInt;
use serde::Serialize;

use crate::error::{Error, Result};

/// The CARv1 header: a CBOR map naming the format version and the DAG
/// root(s) it encodes (spec.md §4.5). Field order here (`roots` then
/// `version`) matches the field order real CARv1 producers emit; readers
/// must not rely on map key order, only on the key names.
#[derive(Serialize)]
struct CarHeaderV1 {
    roots: Vec<Cid>,
    version: u64,
}

/// Stream a CARv1 file: a length-prefixed CBOR header followed by a
/// sequence of length-prefixed `(CID ‖ bytes)` frames, one per block, in
/// the order `blocks` yields them (spec.md §4.5). The caller is
/// responsible for supplying blocks already in a valid reachable-DAG
/// order (see `graphsplit_unixfs::reachable_order`); this writer only
/// concerns itself with CARv1 framing.
pub fn write_car<W: Write>(
    roots: Vec<Cid>,
    blocks: impl Iterator<Item = (Cid, Vec<u8>)>,
    out: &mut W,
) -> Result<()> {
    let header = CarHeaderV1 { roots, version: 1 };
    let header_bytes =
        serde_ipld_dagcbor::to_vec(&header).map_err(|e| Error::HeaderEncode(e.to_string()))?;
    write_len_prefixed(out, &header_bytes)?;

    for (cid, data) in blocks {
        let cid_bytes = cid.to_bytes();
        let mut frame = Vec::with_capacity(cid_bytes.len() + data.len());
        frame.extend_from_slice(&cid_bytes);
        frame.extend_from_slice(&data);
        write_len_prefixed(out, &frame)?;
    }
    Ok(())
}

fn write_len_prefixed<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    let len = bytes.len() as u64;
    out.write_all(&len.encode_var_vec())?;
    out.write_all(bytes)?;
    Ok(())
}
