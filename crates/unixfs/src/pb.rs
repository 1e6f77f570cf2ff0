//! Minimal hand-rolled encoders/decoders for the two protobuf messages
//! UnixFS needs: the DAG-PB envelope (`PBNode`/`PBLink`) and the UnixFS
//! `Data` message carried in a file/directory node's `Data` field.
//!
//! Grounded on the manual `quick_protobuf::Writer` encoding shown in the
//! `rust-ipfs` `unixfs` dir-builder reference (`render_directory`); we use
//! the same low-level `Writer`/`BytesReader` calls rather than codegen,
//! since both messages are small and fixed.

use quick_protobuf::{BytesReader, Writer};

use crate::error::{Error, Result};

/// One link in a DAG-PB node: the child's CID bytes, its display name, and
/// the cumulative size of its subtree (`Tsize`).
#[derive(Debug, Clone)]
pub struct PbLink {
    pub hash: Vec<u8>,
    pub name: String,
    pub tsize: u64,
}

/// A decoded/encoded DAG-PB node: its UnixFS `Data` payload plus an
/// insertion-ordered list of links.
#[derive(Debug, Clone, Default)]
pub struct PbNode {
    pub data: Vec<u8>,
    pub links: Vec<PbLink>,
}

impl PbNode {
    /// Canonical dag-pb encoding: all `Links` fields first (in insertion
    /// order), then `Data` last — matching go-merkledag's wire order.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = Writer::new(&mut buf);
            for link in &self.links {
                let mut link_buf = Vec::new();
                {
                    let mut lw = Writer::new(&mut link_buf);
                    if !link.hash.is_empty() {
                        lw.write_tag(1 << 3 | 2).unwrap();
                        lw.write_bytes(&link.hash).unwrap();
                    }
                    lw.write_tag(2 << 3 | 2).unwrap();
                    lw.write_string(&link.name).unwrap();
                    lw.write_tag(3 << 3 | 0).unwrap();
                    lw.write_varint(link.tsize).unwrap();
                }
                writer.write_tag(2 << 3 | 2).unwrap();
                writer.write_bytes(&link_buf).unwrap();
            }
            if !self.data.is_empty() {
                writer.write_tag(1 << 3 | 2).unwrap();
                writer.write_bytes(&self.data).unwrap();
            }
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = BytesReader::from_bytes(bytes);
        let mut node = Self::default();
        while !reader.is_eof() {
            let tag = reader
                .next_tag(bytes)
                .map_err(|e| Error::Protobuf(e.to_string()))?;
            match tag >> 3 {
                1 => {
                    node.data = reader
                        .read_bytes(bytes)
                        .map_err(|e| Error::Protobuf(e.to_string()))?
                        .to_vec();
                }
                2 => {
                    let link_bytes = reader
                        .read_bytes(bytes)
                        .map_err(|e| Error::Protobuf(e.to_string()))?;
                    node.links.push(decode_link(link_bytes)?);
                }
                _ => {
                    reader
                        .read_unknown(bytes, tag)
                        .map_err(|e| Error::Protobuf(e.to_string()))?;
                }
            }
        }
        Ok(node)
    }
}

fn decode_link(bytes: &[u8]) -> Result<PbLink> {
    let mut reader = BytesReader::from_bytes(bytes);
    let mut link = PbLink {
        hash: Vec::new(),
        name: String::new(),
        tsize: 0,
    };
    while !reader.is_eof() {
        let tag = reader
            .next_tag(bytes)
            .map_err(|e| Error::Protobuf(e.to_string()))?;
        match tag >> 3 {
            1 => {
                link.hash = reader
                    .read_bytes(bytes)
                    .map_err(|e| Error::Protobuf(e.to_string()))?
                    .to_vec();
            }
            2 => {
                link.name = reader
                    .read_string(bytes)
                    .map_err(|e| Error::Protobuf(e.to_string()))?
                    .to_string();
            }
            3 => {
                link.tsize = reader
                    .read_varint64(bytes)
                    .map_err(|e| Error::Protobuf(e.to_string()))?;
            }
            _ => {
                reader
                    .read_unknown(bytes, tag)
                    .map_err(|e| Error::Protobuf(e.to_string()))?;
            }
        }
    }
    Ok(link)
}

/// UnixFS node kind, carried in `Data.Type` (unixfs.proto `DataType`). The
/// DAG builder (spec.md §4.3/§4.4) only ever emits `Raw`, `File` and
/// `Directory`; `Symlink` is decoded so the restorer (spec.md §4.8) can
/// write back a symlink it finds in a CAR built by another producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Raw = 0,
    Directory = 1,
    File = 2,
    Symlink = 4,
}

/// The UnixFS `Data` message stored in a DAG-PB node's `Data` field.
#[derive(Debug, Clone)]
pub struct UnixfsData {
    pub kind: DataType,
    pub data: Vec<u8>,
    pub filesize: Option<u64>,
    pub blocksizes: Vec<u64>,
}

impl UnixfsData {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = Writer::new(&mut buf);
            writer.write_tag(1 << 3).unwrap();
            writer.write_varint(self.kind as u64).unwrap();
            if !self.data.is_empty() {
                writer.write_tag(2 << 3 | 2).unwrap();
                writer.write_bytes(&self.data).unwrap();
            }
            if let Some(filesize) = self.filesize {
                writer.write_tag(3 << 3).unwrap();
                writer.write_varint(filesize).unwrap();
            }
            for block in &self.blocksizes {
                writer.write_tag(4 << 3).unwrap();
                writer.write_varint(*block).unwrap();
            }
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = BytesReader::from_bytes(bytes);
        let mut kind = DataType::Raw;
        let mut data = Vec::new();
        let mut filesize = None;
        let mut blocksizes = Vec::new();
        while !reader.is_eof() {
            let tag = reader
                .next_tag(bytes)
                .map_err(|e| Error::Protobuf(e.to_string()))?;
            match tag >> 3 {
                1 => {
                    let v = reader
                        .read_varint32(bytes)
                        .map_err(|e| Error::Protobuf(e.to_string()))?;
                    kind = match v {
                        0 => DataType::Raw,
                        1 => DataType::Directory,
                        2 => DataType::File,
                        4 => DataType::Symlink,
                        other => return Err(Error::UnknownDataType(other)),
                    };
                }
                2 => {
                    data = reader
                        .read_bytes(bytes)
                        .map_err(|e| Error::Protobuf(e.to_string()))?
                        .to_vec();
                }
                3 => {
                    filesize = Some(
                        reader
                            .read_varint64(bytes)
                            .map_err(|e| Error::Protobuf(e.to_string()))?,
                    );
                }
                4 => {
                    blocksizes.push(
                        reader
                            .read_varint64(bytes)
                            .map_err(|e| Error::Protobuf(e.to_string()))?,
                    );
                }
                _ => {
                    reader
                        .read_unknown(bytes, tag)
                        .map_err(|e| Error::Protobuf(e.to_string()))?;
                }
            }
        }
        Ok(Self {
            kind,
            data,
            filesize,
            blocksizes,
        })
    }
}
