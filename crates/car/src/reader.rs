use std::io::{Cursor, Read};

use cid::Cid;
use integer_encoding::VarInt;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize)]
struct CarHeaderIn {
    roots: Vec<Cid>,
    version: u64,
}

/// A decoded CARv1 file: its declared roots and every block frame, in
/// on-disk order.
pub struct CarFile {
    pub roots: Vec<Cid>,
    pub blocks: Vec<(Cid, Vec<u8>)>,
}

fn read_varint<R: Read>(input: &mut R) -> Result<u64> {
    let mut buf = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte)?;
        buf.push(byte[0]);
        if byte[0] & 0x80 == 0 {
            break;
        }
    }
    u64::decode_var(&buf)
        .map(|(value, _)| value)
        .ok_or_else(|| Error::HeaderDecode("malformed varint length prefix".to_string()))
}

fn read_frame<R: Read>(input: &mut R, len: u64) -> Result<Vec<u8>> {
    if len > 1 << 34 {
        return Err(Error::FrameTooLarge(len));
    }
    let len = len as usize;
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        let n = input.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(Error::Truncated {
                expected: len - filled,
                found: filled,
            });
        }
        filled += n;
    }
    Ok(buf)
}

/// Parse a CARv1 stream in full: header plus every block frame.
pub fn read_car<R: Read>(input: &mut R) -> Result<CarFile> {
    let header_len = read_varint(input)?;
    let header_bytes = read_frame(input, header_len)?;
    let header: CarHeaderIn = serde_ipld_dagcbor::from_slice(&header_bytes)
        .map_err(|e| Error::HeaderDecode(e.to_string()))?;
    if header.version != 1 {
        return Err(Error::UnsupportedVersion(header.version));
    }

    let mut blocks = Vec::new();
    loop {
        let frame_len = match read_varint(input) {
            Ok(len) => len,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };
        if frame_len == 0 {
            // `add-padding`'s zero-length sentinel frame (spec.md §4.6
            // "Optional CAR padding"): the remaining bytes are raw zero
            // padding up to the piece size, not another block.
            break;
        }
        let frame = read_frame(input, frame_len)?;
        let mut cursor = Cursor::new(frame.as_slice());
        let cid = Cid::read_bytes(&mut cursor).map_err(|e| Error::MalformedCid(e.to_string()))?;
        let data_start = cursor.position() as usize;
        blocks.push((cid, frame[data_start..].to_vec()));
    }

    Ok(CarFile {
        roots: header.roots,
        blocks,
    })
}

/// Parse a CARv1 stream and require it to declare exactly one root,
/// mirroring `retrieve.go`'s `Import`, which rejects multi-root CARs.
pub fn read_single_root_car<R: Read>(input: &mut R) -> Result<(Cid, CarFile)> {
    let car = read_car(input)?;
    if car.roots.len() != 1 {
        return Err(Error::RootCountMismatch(car.roots.len()));
    }
    let root = car.roots[0];
    Ok((root, car))
}
