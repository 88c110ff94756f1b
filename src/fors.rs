use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::{address, PkSeed, SkSeed};

use crate::hypertree::HypertreeParams;
use crate::util::extract_bits;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForsMTSig<P: ForsParams> {
    sk: Array<u8, P::N>,
    auth: Array<Array<u8, P::N>, P::A>,
}

impl<P: ForsParams> ForsMTSig<P> {
    const SIZE: usize = P::N::USIZE + P::A::USIZE * P::N::USIZE;

    fn write_to(&self, slice: &mut [u8]) {
        debug_assert!(
            slice.len() == Self::SIZE,
            "Writing FORS MT sig to slice of incorrect length"
        );

        slice
            .chunks_exact_mut(P::N::USIZE)
            .enumerate()
            .for_each(|(i, c)| {
                if i == 0 {
                    c.copy_from_slice(&self.sk);
                } else {
                    c.copy_from_slice(&self.auth[i - 1]);
                }
            });
    }
}

impl<P: ForsParams> Default for ForsMTSig<P> {
    fn default() -> Self {
        Self {
            sk: Array::default(),
            auth: Array::default(),
        }
    }
}

impl<P: ForsParams> TryFrom<&[u8]> for ForsMTSig<P> {
    // TODO - real error type
    type Error = ();
    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if slice.len() != ForsMTSig::<P>::SIZE {
            return Err(());
        }
        #[allow(deprecated)]
        let sk = Array::clone_from_slice(&slice[..P::N::USIZE]);
        let mut auth: Array<Array<u8, P::N>, P::A> = Array::default();
        for i in 0..P::A::USIZE {
            auth[i].copy_from_slice(
                &slice[P::N::USIZE + i * P::N::USIZE..P::N::USIZE + (i + 1) * P::N::USIZE],
            );
        }
        Ok(Self { sk, auth })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForsSignature<P: ForsParams>(Array<ForsMTSig<P>, P::K>);

impl<P: ForsParams> TryFrom<&[u8]> for ForsSignature<P> {
    // TODO - real error type
    type Error = ();
    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if slice.len() != Self::SIZE {
            return Err(());
        }
        Ok(Self(
            slice
                .chunks(ForsMTSig::<P>::SIZE)
                .map(|c| c.try_into().unwrap())
                .collect(),
        ))
    }
}

impl<P: ForsParams> Default for ForsSignature<P> {
    fn default() -> Self {
        Self(Array::default())
    }
}

impl<P: ForsParams> ForsSignature<P> {
    pub const SIZE: usize = P::K::USIZE * (P::A::USIZE + 1) * P::N::USIZE;

    pub fn write_to(&self, slice: &mut [u8]) {
        debug_assert!(
            slice.len() == Self::SIZE,
            "Writing FORS sig to slice of incorrect length"
        );

        slice
            .chunks_exact_mut(ForsMTSig::<P>::SIZE)
            .enumerate()
            .for_each(|(i, c)| self.0[i].write_to(c));
    }

    #[cfg(feature = "alloc")]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut v = vec![0u8; Self::SIZE];
        self.write_to(&mut v);
        v
    }
}

pub(crate) trait ForsParams: HypertreeParams {
    type K: ArraySize + Eq + Debug;
    type A: ArraySize + Eq + Debug;
    type MD: ArraySize; // ceil(K*A/8)

    fn fors_sk_gen(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &address::ForsTree,
        idx: u32,
    ) -> Array<u8, Self::N> {
        let mut adrs = adrs.prf_adrs();
        adrs.tree_index.set(idx);
        Self::prf_sk(pk_seed, sk_seed, &adrs)
    }

    fn fors_node(
        sk_seed: &SkSeed<Self::N>,
        i: u32,
        z: u32,
        pk_seed: &PkSeed<Self::N>,
        adrs: &address::ForsTree,
    ) -> Array<u8, Self::N> {
        debug_assert!(z <= Self::A::U32);
        debug_assert!(i < (Self::K::U32 << (Self::A::U32 - z)));
        let mut adrs = adrs.clone(); // TODO: do we really need clone or should we take mut ref?
        if z == 0 {
            let sk = Self::fors_sk_gen(sk_seed, pk_seed, &adrs, i);
            adrs.tree_height.set(0);
            adrs.tree_index.set(i);
            Self::f(pk_seed, &adrs, &sk)
        } else {
            let lnode = Self::fors_node(sk_seed, 2 * i, z - 1, pk_seed, &adrs);
            let rnode = Self::fors_node(sk_seed, 2 * i + 1, z - 1, pk_seed, &adrs);
            adrs.tree_height.set(z);
            adrs.tree_index.set(i);
            Self::h(pk_seed, &adrs, &lnode, &rnode)
        }
    }

    /// Tree indices for each of the `K` FORS trees, extracted LSB-first from
    /// the message digest `a` bits at a time: tree `i` takes bits
    /// `[i*a, i*a + a - 1]`. This bit order is distinct from WOTS+'s
    /// MSB-first `base_2b` digit decomposition.
    fn fors_indices(md: &Array<u8, Self::MD>) -> Array<u32, Self::K> {
        Array::from_fn(|i| {
            let i = i as u32;
            extract_bits(
                md.as_slice(),
                (i * Self::A::U32) as usize,
                (i * Self::A::U32 + Self::A::U32 - 1) as usize,
            )
        })
    }

    fn fors_sign(
        md: &Array<u8, Self::MD>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &address::ForsTree,
    ) -> ForsSignature<Self> {
        let mut sig = ForsSignature::<Self>::default();
        let indices = Self::fors_indices(md);
        for i in 0..Self::K::U32 {
            sig.0[i as usize].sk = Self::fors_sk_gen(
                sk_seed,
                pk_seed,
                adrs,
                (i << Self::A::U32) + u32::from(indices[i as usize]),
            );
            for j in 0..Self::A::U32 {
                let s = (indices[i as usize] >> j) ^ 1;
                sig.0[i as usize].auth[j as usize] = Self::fors_node(
                    sk_seed,
                    (i << (Self::A::U32 - j)) + u32::from(s),
                    j,
                    pk_seed,
                    adrs,
                );
            }
        }
        sig
    }

    fn fors_pk_from_sig(
        sig: &ForsSignature<Self>,
        md: &Array<u8, Self::MD>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &address::ForsTree,
    ) -> Array<u8, Self::N> {
        let mut adrs = adrs.clone();
        let indices = Self::fors_indices(md);
        let mut roots = Array::<Array<u8, Self::N>, Self::K>::default();
        for i in 0..Self::K::U32 {
            let sk = &sig.0[i as usize].sk;
            adrs.tree_height.set(0);
            adrs.tree_index
                .set((i << Self::A::U32) + u32::from(indices[i as usize]));
            let mut node = Self::f(pk_seed, &adrs, sk);
            for j in 0..Self::A::U32 {
                adrs.tree_height.set(j + 1);
                adrs.tree_index.set(adrs.tree_index.get() >> 1);
                if indices[i as usize] >> j & 1 == 0 {
                    node = Self::h(pk_seed, &adrs, &node, &sig.0[i as usize].auth[j as usize]);
                } else {
                    node = Self::h(pk_seed, &adrs, &sig.0[i as usize].auth[j as usize], &node);
                }
            }
            roots[i as usize] = node;
        }
        Self::t(pk_seed, &adrs.fors_roots(), &roots)
    }
}

#[cfg(test)]
mod tests {
    use self::address::ForsTree;
    use crate::util::macros::test_parameter_sets;

    use rand::{thread_rng, Rng, RngCore};

    use super::*;

    #[test]
    fn fors_indices_are_lsb_first() {
        // a = 4, k = 2: tree 0 reads bits [0,3], tree 1 reads bits [4,7].
        // byte 0 = 0b0111_0010 -> bits [0,3] = 0b0010 = 2, bits [4,7] = 0b0111 = 7.
        let md = [0b0111_0010u8];
        assert_eq!(extract_bits(&md, 0, 3), 2);
        assert_eq!(extract_bits(&md, 4, 7), 7);
    }

    fn test_sign_verify<Fors: ForsParams>() {
        // Generate random sk_seed, pk_seed, message, index, address
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);

        let pk_seed = PkSeed::new(&mut rng);

        let mut msg = Array::<u8, Fors::MD>::default();
        rng.fill_bytes(msg.as_mut_slice());

        let idx_tree = rng.gen_range(
            0..=(1u64
                .wrapping_shl(Fors::H::U32 - Fors::HPrime::U32)
                .wrapping_sub(1)),
        );
        let idx_leaf = rng.gen_range(0..(1 << (Fors::HPrime::USIZE)));

        let mut adrs = ForsTree::new(idx_tree, idx_leaf);
        let mut pks = Array::<Array<u8, Fors::N>, Fors::K>::default();
        for i in 0..Fors::K::U32 {
            adrs.tree_index.set(i);
            pks[i as usize] = Fors::fors_node(&sk_seed, i, Fors::A::U32, &pk_seed, &adrs);
        }
        let pk = Fors::t(&pk_seed, &adrs.fors_roots(), &pks);

        let sig = Fors::fors_sign(&msg, &sk_seed, &pk_seed, &adrs);
        let pk_recovered = Fors::fors_pk_from_sig(&sig, &msg, &pk_seed, &adrs);
        assert_eq!(pk, pk_recovered);
    }

    test_parameter_sets!(test_sign_verify);

    fn test_sign_verify_failure<Fors: ForsParams>() {
        // Generate random sk_seed, pk_seed, message, index, address
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);

        let pk_seed = PkSeed::new(&mut rng);

        let mut msg = Array::<u8, Fors::MD>::default();
        rng.fill_bytes(msg.as_mut_slice());

        let idx_tree = rng.gen_range(
            0..=(1u64
                .wrapping_shl(Fors::H::U32 - Fors::HPrime::U32)
                .wrapping_sub(1)),
        );
        let idx_leaf = rng.gen_range(0..(1 << (Fors::HPrime::USIZE)));

        let mut adrs = ForsTree::new(idx_tree, idx_leaf);
        let mut pks = Array::<Array<u8, Fors::N>, Fors::K>::default();
        for i in 0..Fors::K::U32 {
            adrs.tree_index.set(i);
            pks[i as usize] = Fors::fors_node(&sk_seed, i, Fors::A::U32, &pk_seed, &adrs);
        }
        let pk = Fors::t(&pk_seed, &adrs.fors_roots(), &pks);

        let sig = Fors::fors_sign(&msg, &sk_seed, &pk_seed, &adrs);

        // Modify the message
        msg[0] ^= 0xff; // Invert the first byte of the message

        let pk_recovered = Fors::fors_pk_from_sig(&sig, &msg, &pk_seed, &adrs);
        assert_ne!(
            pk, pk_recovered,
            "Signature verification should fail with a modified message"
        );
    }

    test_parameter_sets!(test_sign_verify_failure);
}
