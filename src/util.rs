use crate::fors::ForsParams;
use hybrid_array::{typenum::Unsigned, Array, ArraySize};

// Base-w decomposition (w in {4, 16}), most-significant digit first within
// each byte. Used for WOTS+ message/checksum digits.
pub fn base_2b<OutLen: ArraySize, B: Unsigned>(x: &[u8]) -> Array<u16, OutLen> {
    debug_assert!(x.len() >= (OutLen::USIZE * B::USIZE + 7) / 8);
    debug_assert!(B::USIZE <= 16);

    let mut bits = 0usize;
    let mut i = 0;
    let mut total = 0usize;

    Array::<u16, OutLen>::from_fn(|_: usize| {
        while bits < B::USIZE {
            total = (total << 8) + x[i] as usize;
            bits += 8;
            i += 1;
        }
        bits -= B::USIZE;
        let out = (total >> bits) & ((1 << B::U8) - 1);
        total &= (1 << bits) - 1; // clear the consumed portion to avoid overflow
        out.try_into().expect("B is less than 16")
    })
}

/// Extracts a `to - from + 1` (<= 32) bit integer from `msg`, LSB-first within
/// each byte: bit 0 of byte 0 is bit 0 of the output when `from == 0`. This is
/// the bit order FORS uses to turn its message digest into tree indices; it
/// differs from `base_2b`'s MSB-first digit convention used by WOTS+.
pub fn extract_bits(msg: &[u8], from: usize, to: usize) -> u32 {
    let mut res: u32 = 0;
    for i in from..=to {
        let bit = (msg[i / 8] >> (i % 8)) & 1;
        res |= u32::from(bit) << (i - from);
    }
    res
}

/// Separates the digest into the FORS message, the hyper-tree tree index, and the
/// hyper-tree leaf index.
pub fn split_digest<P: ForsParams>(digest: &Array<u8, P::M>) -> (&Array<u8, P::MD>, u64, u32) {
    #[allow(deprecated)]
    let m = Array::from_slice(&digest[..P::MD::USIZE]);
    let idx_tree_size = (P::H::USIZE - P::HPrime::USIZE).div_ceil(8);
    let idx_leaf_size = P::HPrime::USIZE.div_ceil(8);
    let mut idx_tree_bytes = [0u8; 8];
    let mut idx_leaf_bytes = [0u8; 4];
    idx_tree_bytes[8 - idx_tree_size..]
        .copy_from_slice(&digest[P::MD::USIZE..P::MD::USIZE + idx_tree_size]);
    idx_leaf_bytes[4 - idx_leaf_size..].copy_from_slice(
        &digest[P::MD::USIZE + idx_tree_size..P::MD::USIZE + idx_tree_size + idx_leaf_size],
    );

    // For the 256-bit parameter sets, H - H' == 64, so the naive 1 << 64 shift
    // would overflow; the mask there is the all-ones u64.
    let mask: u64 = 1u64
        .checked_shl(P::H::U32 - P::HPrime::U32)
        .unwrap_or(0)
        .wrapping_sub(1);
    let idx_tree = u64::from_be_bytes(idx_tree_bytes) & mask;
    let idx_leaf = u32::from_be_bytes(idx_leaf_bytes) & ((1 << P::HPrime::USIZE) - 1);
    (m, idx_tree, idx_leaf)
}
