//! Tweakable hash constructions over SHAKE256.
//!
//! A `HashSuite` bundles the five component hashes a parameter set needs: `PRF`,
//! `PRF_msg`, `H_msg`, and the family `T_ℓ` (with `F ≡ T_1`, `H ≡ T_2`). All of
//! them absorb a contiguous prefix and squeeze a fixed number of bytes; none
//! carries state across calls.
mod shake;

use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};

pub use shake::*;

use crate::{address::Address, PkSeed, SkPrf, SkSeed};

/// Component hash functions shared by every parameter set.
pub(crate) trait HashSuite: Sized + Clone + Debug + PartialEq + Eq {
    type N: ArraySize + Debug + Clone + PartialEq + Eq;
    type M: ArraySize + Debug + Clone + PartialEq + Eq;

    /// Pseudorandom function generating the randomizer for randomized message hashing.
    fn prf_msg(
        sk_prf: &SkPrf<Self::N>,
        opt_rand: &Array<u8, Self::N>,
        msg: impl AsRef<[u8]>,
    ) -> Array<u8, Self::N>;

    /// Hashes a message under a given randomizer.
    fn h_msg(
        rand: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        pk_root: &Array<u8, Self::N>,
        msg: impl AsRef<[u8]>,
    ) -> Array<u8, Self::M>;

    /// PRF used to generate WOTS+ and FORS secret values.
    fn prf_sk(
        pk_seed: &PkSeed<Self::N>,
        sk_seed: &SkSeed<Self::N>,
        adrs: &impl Address,
    ) -> Array<u8, Self::N>;

    /// Maps an `L*N`-byte string to an `N`-byte string (robust or simple, per variant).
    fn t<L: ArraySize>(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m: &Array<Array<u8, Self::N>, L>,
    ) -> Array<u8, Self::N>;

    /// `T_2`. Used to combine Merkle tree siblings.
    fn h(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m1: &Array<u8, Self::N>,
        m2: &Array<u8, Self::N>,
    ) -> Array<u8, Self::N>;

    /// `T_1`. Used for WOTS+ and FORS chain steps.
    fn f(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m: &Array<u8, Self::N>,
    ) -> Array<u8, Self::N>;
}
