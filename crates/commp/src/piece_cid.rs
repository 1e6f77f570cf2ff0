//! PieceCID construction (spec.md §4.6 step 4, §6 "PieceCID encoding").

use cid::Cid;
use multihash::Multihash;

use crate::error::{Error, Result};

/// Multicodec for an unsealed Filecoin piece commitment.
pub const FIL_COMMITMENT_UNSEALED: u64 = 0xf101;
/// Multihash code for the SHA-254-trunc254-padded piece-commitment digest.
pub const SHA2_256_TRUNC254_PADDED: u64 = 0x1012;

/// Wrap a 32-byte merkle root as a `PieceCID`: a CIDv1 with codec
/// `fil-commitment-unsealed` and multihash `sha2-256-trunc254-padded`. The
/// default `Display`/`to_string()` for a CIDv1 already renders as multibase
/// base32 (spec.md §6), so callers needing the canonical string form can
/// just call `.to_string()`.
pub fn from_root(root: [u8; 32]) -> Result<Cid> {
    let mh = Multihash::<64>::wrap(SHA2_256_TRUNC254_PADDED, &root)
        .map_err(|e| Error::Multihash(e.to_string()))?;
    Ok(Cid::new_v1(FIL_COMMITMENT_UNSEALED, mh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_cid_string() {
        let cid = from_root([0x42; 32]).unwrap();
        assert_eq!(cid.codec(), FIL_COMMITMENT_UNSEALED);
        assert_eq!(cid.hash().code(), SHA2_256_TRUNC254_PADDED);
        assert_eq!(cid.hash().digest(), &[0x42; 32]);
        // CIDv1 defaults to multibase base32 in its string form.
        assert!(cid.to_string().starts_with('b'));
    }
}
