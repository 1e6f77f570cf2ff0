//! Binary SHA-254-trunc254 merkle tree over Fr32 leaves (spec.md §4.6 step 3).

use sha2::{Digest, Sha256};

/// Combine two 32-byte Fr32 leaves/nodes into their parent: `SHA-256(left ‖
/// right)` with the top two bits of the digest cleared, i.e. taken mod
/// `2^254` (spec.md §4.6 step 3). The digest is treated the same way
/// [`crate::fr32::fr32_leaves`] builds a leaf: as a little-endian 256-bit
/// integer, so "top two bits" live in the high two bits of the last byte.
fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out[31] &= 0b0011_1111;
    out
}

/// Fold a power-of-two-sized list of leaves into a single root by repeated
/// pairwise hashing. The tree height is `log2(leaves.len())` (spec.md §4.6
/// step 3: "tree height is `log2(paddedSize / 32)`").
///
/// # Panics
///
/// Panics if `leaves` is empty or its length is not a power of two — the
/// caller ([`crate::compute_commp`]) is responsible for zero-padding to the
/// asserted `paddedSize` before calling this.
#[must_use]
pub fn merkle_root(mut leaves: Vec<[u8; 32]>) -> [u8; 32] {
    assert!(!leaves.is_empty(), "merkle_root requires at least one leaf");
    assert!(
        leaves.len().is_power_of_two(),
        "merkle_root requires a power-of-two leaf count, got {}",
        leaves.len()
    );
    while leaves.len() > 1 {
        leaves = leaves
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    leaves[0]
}
