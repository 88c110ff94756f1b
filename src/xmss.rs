//! Fixed-input XMSS: a Merkle tree of WOTS+ public keys with authentication paths.
//!
//! Each hyper-tree layer is one XMSS instance of height `h' = h/d`. A leaf is the
//! WOTS+ public key at that leaf's keypair index; internal nodes combine their
//! two children with `H`. Node construction is written recursively rather than
//! with an explicit stack: the recursion depth is bounded by `h'` (at most 9
//! across all parameter sets), so there is no meaningful stack-growth risk, and
//! it mirrors the recursive shape already used for FORS subtrees.

use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::address::WotsHash;
use crate::wots::{WotsParams, WotsSig};
use crate::{PkSeed, SkSeed};

/// An XMSS signature: a WOTS+ signature of the message, followed by the
/// `h'`-entry authentication path up to this layer's root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmssSig<P: XmssParams> {
    wots_sig: WotsSig<P>,
    auth: Array<Array<u8, P::N>, P::HPrime>,
}

impl<P: XmssParams> XmssSig<P> {
    pub const SIZE: usize = WotsSig::<P>::SIZE + P::HPrime::USIZE * P::N::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() == Self::SIZE, "XMSS serialize length mismatch");
        let (wots_buf, auth_buf) = buf.split_at_mut(WotsSig::<P>::SIZE);
        self.wots_sig.write_to(wots_buf);
        auth_buf
            .chunks_exact_mut(P::N::USIZE)
            .zip(self.auth.iter())
            .for_each(|(buf, node)| buf.copy_from_slice(node.as_slice()));
    }

    #[cfg(feature = "alloc")]
    #[cfg(test)]
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        let mut vec = alloc::vec![0u8; Self::SIZE];
        self.write_to(&mut vec);
        vec
    }
}

impl<P: XmssParams> TryFrom<&[u8]> for XmssSig<P> {
    type Error = ();

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            return Err(());
        }
        let (wots_bytes, auth_bytes) = value.split_at(WotsSig::<P>::SIZE);
        let wots_sig = WotsSig::try_from(wots_bytes)?;
        let mut auth = Array::<Array<u8, P::N>, P::HPrime>::default();
        for (i, chunk) in auth_bytes.chunks_exact(P::N::USIZE).enumerate() {
            auth[i].copy_from_slice(chunk);
        }
        Ok(XmssSig { wots_sig, auth })
    }
}

pub trait XmssParams: WotsParams + Sized {
    /// Height of a single hyper-tree layer (`h/d`).
    type HPrime: ArraySize + Debug + Eq;

    /// Root of the height-`z` subtree whose leftmost leaf is the WOTS+ public
    /// key at keypair index `s`. Requires `s mod 2^z == 0`.
    fn xmss_node(
        sk_seed: &SkSeed<Self::N>,
        s: u32,
        z: u32,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        if z == 0 {
            let mut leaf_adrs = adrs.clone();
            leaf_adrs.key_pair_adrs.set(s);
            Self::wots_pk_gen(sk_seed, pk_seed, &leaf_adrs)
        } else {
            let lnode = Self::xmss_node(sk_seed, s, z - 1, pk_seed, adrs);
            let rnode = Self::xmss_node(sk_seed, s + (1 << (z - 1)), z - 1, pk_seed, adrs);
            let mut tree_adrs = adrs.tree_adrs();
            tree_adrs.tree_height.set(z);
            tree_adrs.tree_index.set(s >> z);
            Self::h(pk_seed, &tree_adrs, &lnode, &rnode)
        }
    }

    /// `treehash(., 0, h', .)`, i.e. the root of the whole layer.
    fn xmss_pk_gen(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        Self::xmss_node(sk_seed, 0, Self::HPrime::U32, pk_seed, adrs)
    }

    fn xmss_sign(
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        leaf_idx: u32,
        adrs: &WotsHash,
    ) -> XmssSig<Self> {
        let mut leaf_adrs = adrs.clone();
        leaf_adrs.key_pair_adrs.set(leaf_idx);
        let wots_sig = Self::wots_sign(m, sk_seed, pk_seed, &leaf_adrs);

        let auth = Array::<Array<u8, Self::N>, Self::HPrime>::from_fn(|j| {
            let j = j as u32;
            let s = ((leaf_idx >> j) ^ 1) << j;
            Self::xmss_node(sk_seed, s, j, pk_seed, adrs)
        });

        XmssSig { wots_sig, auth }
    }

    fn xmss_pk_from_sig(
        leaf_idx: u32,
        sig: &XmssSig<Self>,
        m: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        let mut leaf_adrs = adrs.clone();
        leaf_adrs.key_pair_adrs.set(leaf_idx);
        let mut node = Self::wots_pk_from_sig(&sig.wots_sig, m, pk_seed, &leaf_adrs);

        let mut tree_adrs = adrs.tree_adrs();
        for j in 0..Self::HPrime::U32 {
            tree_adrs.tree_height.set(j + 1);
            tree_adrs.tree_index.set(leaf_idx >> (j + 1));
            node = if (leaf_idx >> j) & 1 == 0 {
                Self::h(pk_seed, &tree_adrs, &node, &sig.auth[j as usize])
            } else {
                Self::h(pk_seed, &tree_adrs, &sig.auth[j as usize], &node)
            };
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashes::Shake128fRobust;
    use crate::util::macros::test_parameter_sets;
    use crate::{PkSeed, SkSeed};
    use rand::{thread_rng, RngCore};

    fn test_sign_verify<X: XmssParams>() {
        let mut rng = thread_rng();
        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let adrs = WotsHash::default();

        let mut m = Array::<u8, X::N>::default();
        rng.fill_bytes(m.as_mut_slice());

        let pk = X::xmss_pk_gen(&sk_seed, &pk_seed, &adrs);

        for leaf_idx in 0..(1u32 << X::HPrime::U32) {
            let sig = X::xmss_sign(&m, &sk_seed, &pk_seed, leaf_idx, &adrs);
            let recovered = X::xmss_pk_from_sig(leaf_idx, &sig, &m, &pk_seed, &adrs);
            assert_eq!(pk, recovered, "mismatch at leaf {leaf_idx}");
        }
    }

    // Only exercised over one (small-height) parameter set - its HPrime=3 keeps
    // the 2^HPrime leaf sweep above cheap; larger HPrime sets are covered by
    // hyper-tree-level round-trip tests instead.
    #[test]
    fn xmss_round_trip_shake128f_robust() {
        test_sign_verify::<Shake128fRobust>();
    }

    fn test_sign_verify_fail<X: XmssParams>() {
        let mut rng = thread_rng();
        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let adrs = WotsHash::default();

        let mut m = Array::<u8, X::N>::default();
        rng.fill_bytes(m.as_mut_slice());

        let leaf_idx = 0;
        let sig = X::xmss_sign(&m, &sk_seed, &pk_seed, leaf_idx, &adrs);
        m[0] ^= 0xff;
        let pk = X::xmss_pk_gen(&sk_seed, &pk_seed, &adrs);
        let recovered = X::xmss_pk_from_sig(leaf_idx, &sig, &m, &pk_seed, &adrs);
        assert_ne!(pk, recovered);
    }

    test_parameter_sets!(test_sign_verify_fail);
}
