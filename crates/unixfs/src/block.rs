use cid::Cid;
use multihash_codetable::{Code, MultihashDigest};

use crate::pb::PbNode;

/// A content-addressed `(CID, bytes)` pair. A block's CID is the CIDv0
/// (DAG-PB codec, SHA-256 multihash) of its own bytes, so two blocks with
/// identical bytes always carry identical CIDs.
#[derive(Debug, Clone)]
pub struct Block {
    pub cid: Cid,
    pub data: Vec<u8>,
}

impl Block {
    /// Wrap a DAG-PB node's raw bytes into an addressed block.
    #[must_use]
    pub fn from_dagpb_bytes(data: Vec<u8>) -> Self {
        let digest = Code::Sha2_256.digest(&data);
        let cid = Cid::new_v0(digest).expect("sha2-256 is a valid CIDv0 multihash");
        Self { cid, data }
    }

    /// Encode a [`PbNode`] and wrap it as a block in one step.
    #[must_use]
    pub fn from_node(node: &PbNode) -> Self {
        Self::from_dagpb_bytes(node.encode())
    }
}

/// A write-once, in-memory content-addressed store for a single slice's
/// blocks (spec.md §3 "Block": "write-once within the lifetime of a
/// slice's store"). Grounded on `storage-mater`'s `Blockstore`, simplified
/// to the CARv1-only, single-slice scope this spec needs (no chunk/tree
/// width bookkeeping — file chunking lives in [`crate::file_builder`]).
#[derive(Debug, Default)]
pub struct BlockStore {
    blocks: indexmap::IndexMap<Cid, Vec<u8>>,
}

impl BlockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block. Idempotent: inserting the same CID twice with
    /// identical bytes is a no-op; `cid` uniquely determines `data`, so
    /// there is nothing to reconcile beyond skipping the duplicate write.
    pub fn insert(&mut self, block: Block) {
        self.blocks.entry(block.cid).or_insert(block.data);
    }

    #[must_use]
    pub fn get(&self, cid: &Cid) -> Option<&[u8]> {
        self.blocks.get(cid).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, cid: &Cid) -> bool {
        self.blocks.contains_key(cid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate blocks in insertion order (used by the CAR writer, which
    /// doesn't otherwise care about order but benefits from determinism).
    pub fn iter(&self) -> impl Iterator<Item = (&Cid, &[u8])> {
        self.blocks.iter().map(|(cid, data)| (cid, data.as_slice()))
    }
}

/// Depth-first pre-order walk of every block reachable from `root` via
/// DAG-PB links, visiting each distinct CID exactly once (spec.md §4.5:
/// "an 'all descendants' selector over every outgoing link ... every edge
/// followed exactly once per distinct CID"). The store already only holds
/// blocks this slice produced, so this doubles as a sanity check that
/// nothing was left unlinked.
pub fn reachable_order(root: Cid, store: &BlockStore) -> crate::error::Result<Vec<Cid>> {
    let mut order = Vec::new();
    let mut visited = std::collections::HashSet::new();
    visit(root, store, &mut visited, &mut order)?;
    Ok(order)
}

fn visit(
    cid: Cid,
    store: &BlockStore,
    visited: &mut std::collections::HashSet<Cid>,
    order: &mut Vec<Cid>,
) -> crate::error::Result<()> {
    if !visited.insert(cid) {
        return Ok(());
    }
    order.push(cid);
    let Some(data) = store.get(&cid) else {
        return Err(crate::error::Error::MissingBlock(cid));
    };
    let node = PbNode::decode(data)?;
    for link in node.links {
        let child = Cid::try_from(link.hash).map_err(|e| crate::error::Error::Protobuf(e.to_string()))?;
        visit(child, store, visited, order)?;
    }
    Ok(())
}
