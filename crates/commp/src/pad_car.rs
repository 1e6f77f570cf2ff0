//! Optional zero-padding of a CAR buffer up to its piece's `paddedSize`
//! (spec.md §4.6 "Optional CAR padding", `add-padding`).

use crate::error::{Error, Result};

/// Grow `buf` in place until it is exactly `padded_size` bytes long.
///
/// Per spec.md §4.6: a single `0x00` framing-marker byte is written first —
/// a CAR reader parses it as a zero-length varint frame and stops, the same
/// way it would at a genuine end of stream — and the remaining bytes are
/// raw zero padding. If `buf` is already `padded_size` bytes long this is a
/// no-op (spec.md §9: "`add-padding` with already-aligned input ... must
/// accept a no-op pad without corrupting the `PieceCID` relation").
pub fn pad_car(buf: &mut Vec<u8>, padded_size: u64) -> Result<()> {
    let current = buf.len() as u64;
    if current == padded_size {
        return Ok(());
    }
    if current > padded_size {
        return Err(Error::AlreadyLargerThanTarget {
            current,
            target: padded_size,
        });
    }
    let needed = padded_size - current;
    buf.push(0x00);
    let zeros = needed - 1;
    buf.resize(buf.len() + zeros as usize, 0u8);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_up_to_exact_target_length() {
        let mut buf = vec![1u8; 100];
        pad_car(&mut buf, 128).unwrap();
        assert_eq!(buf.len(), 128);
        assert_eq!(buf[100], 0x00);
        assert!(buf[101..].iter().all(|&b| b == 0));
    }

    #[test]
    fn already_aligned_is_a_no_op() {
        let mut buf = vec![7u8; 128];
        pad_car(&mut buf, 128).unwrap();
        assert_eq!(buf, vec![7u8; 128]);
    }

    #[test]
    fn rejects_a_buffer_already_past_the_target() {
        let mut buf = vec![0u8; 200];
        assert!(matches!(
            pad_car(&mut buf, 128),
            Err(Error::AlreadyLargerThanTarget { current: 200, target: 128 })
        ));
    }
}
