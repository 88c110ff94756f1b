use core::fmt::Debug;
use core::marker::PhantomData;

use crate::address::Address;
use crate::fors::ForsParams;
use crate::hashes::HashSuite;
use crate::hypertree::HypertreeParams;
use crate::wots::WotsParams;
use crate::xmss::XmssParams;
use crate::{ParameterSet, PkSeed, SkPrf, SkSeed};
use digest::{ExtendableOutput, Update, XofReader};
use hybrid_array::typenum::consts::{U16, U30, U32};
use hybrid_array::typenum::{U24, U34, U39, U42, U47, U49};
use hybrid_array::{Array, ArraySize};
use sha3::Shake256;
use typenum::U;

/// The two tweakable-hash modes from section 4.2: with (`Robust`) or without
/// (`Simple`) a bitmask XORed into the input before the final hash.
pub(crate) trait Variant: Clone + Debug + PartialEq + Eq {
    const ROBUST: bool;
    const SUFFIX: &'static str;
}

/// XORs a SHAKE256-derived mask into the message blocks before hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robust;
impl Variant for Robust {
    const ROBUST: bool = true;
    const SUFFIX: &'static str = "robust";
}

/// Hashes the message blocks directly, with no masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simple;
impl Variant for Simple {
    const ROBUST: bool = false;
    const SUFFIX: &'static str = "simple";
}

/// Implementation of the component hash functions using SHAKE256.
///
/// `N` is the security parameter in bytes, `M` the `H_msg` digest length, and
/// `V` selects the robust or simple tweakable-hash variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shake<N, M, V> {
    _n: PhantomData<N>,
    _m: PhantomData<M>,
    _v: PhantomData<V>,
}

impl<N: ArraySize, M: ArraySize, V: Variant> HashSuite for Shake<N, M, V>
where
    N: Debug + Clone + PartialEq + Eq,
    M: Debug + Clone + PartialEq + Eq,
{
    type N = N;
    type M = M;

    fn prf_msg(
        sk_prf: &SkPrf<Self::N>,
        opt_rand: &Array<u8, Self::N>,
        msg: impl AsRef<[u8]>,
    ) -> Array<u8, Self::N> {
        let hasher = Shake256::default()
            .chain(sk_prf.as_ref())
            .chain(opt_rand.as_slice())
            .chain(msg.as_ref());
        let mut output = Array::<u8, Self::N>::default();
        hasher.finalize_xof_into(&mut output);
        output
    }

    fn h_msg(
        rand: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        pk_root: &Array<u8, Self::N>,
        msg: impl AsRef<[u8]>,
    ) -> Array<u8, Self::M> {
        let hasher = Shake256::default()
            .chain(rand.as_slice())
            .chain(pk_seed.as_ref())
            .chain(pk_root.as_slice())
            .chain(msg.as_ref());
        let mut output = Array::<u8, Self::M>::default();
        hasher.finalize_xof_into(&mut output);
        output
    }

    fn prf_sk(
        pk_seed: &PkSeed<Self::N>,
        sk_seed: &SkSeed<Self::N>,
        adrs: &impl Address,
    ) -> Array<u8, Self::N> {
        let hasher = Shake256::default()
            .chain(pk_seed.as_ref())
            .chain(adrs.as_ref())
            .chain(sk_seed.as_ref());
        let mut output = Array::<u8, Self::N>::default();
        hasher.finalize_xof_into(&mut output);
        output
    }

    fn t<L: ArraySize>(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m: &Array<Array<u8, Self::N>, L>,
    ) -> Array<u8, Self::N> {
        if V::ROBUST {
            let mut mask_reader = Shake256::default()
                .chain(pk_seed.as_ref())
                .chain(adrs.as_ref())
                .finalize_xof();
            let masked = Array::<Array<u8, Self::N>, L>::from_fn(|i| {
                let mut mask = Array::<u8, Self::N>::default();
                mask_reader.read(mask.as_mut_slice());
                let mut block = m[i].clone();
                for (b, mask_byte) in block.iter_mut().zip(mask.iter()) {
                    *b ^= mask_byte;
                }
                block
            });
            let mut hasher = Shake256::default().chain(pk_seed.as_ref()).chain(adrs.as_ref());
            masked.iter().for_each(|blk| hasher.update(blk.as_slice()));
            let mut output = Array::<u8, Self::N>::default();
            hasher.finalize_xof_into(&mut output);
            output
        } else {
            let mut hasher = Shake256::default().chain(pk_seed.as_ref()).chain(adrs.as_ref());
            m.iter().for_each(|blk| hasher.update(blk.as_slice()));
            let mut output = Array::<u8, Self::N>::default();
            hasher.finalize_xof_into(&mut output);
            output
        }
    }

    fn h(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m1: &Array<u8, Self::N>,
        m2: &Array<u8, Self::N>,
    ) -> Array<u8, Self::N> {
        Self::t::<U<2>>(pk_seed, adrs, &Array([m1.clone(), m2.clone()]))
    }

    fn f(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m: &Array<u8, Self::N>,
    ) -> Array<u8, Self::N> {
        Self::t::<U<1>>(pk_seed, adrs, &Array([m.clone()]))
    }
}

/// Declares the 12 admitted SPHINCS+-SHAKE parameter sets (table 3 of the r3.1
/// specification): one `robust` and one `simple` monomorphization per
/// security-level/speed combination.
macro_rules! param_set {
    ($level_s:ident, $level_f:ident, $n:ty, $m_s:ty, $m_f:ty, $wots_msg:expr, $wots_sig:expr,
     $hprime_s:expr, $hprime_f:expr, $d_s:expr, $d_f:expr, $h_s:expr, $h_f:expr,
     $k_s:expr, $a_s:expr, $md_s:expr, $k_f:expr, $a_f:expr, $md_f:expr,
     $name_s:literal, $name_f:literal) => {
        paste::paste! {
            #[doc = concat!("SHAKE256 ", stringify!($n), "-byte security, small signatures")]
            pub type [<$level_s Robust>] = Shake<$n, $m_s, Robust>;
            #[doc = concat!("SHAKE256 ", stringify!($n), "-byte security, small signatures")]
            pub type [<$level_s Simple>] = Shake<$n, $m_s, Simple>;
            #[doc = concat!("SHAKE256 ", stringify!($n), "-byte security, fast signatures")]
            pub type [<$level_f Robust>] = Shake<$n, $m_f, Robust>;
            #[doc = concat!("SHAKE256 ", stringify!($n), "-byte security, fast signatures")]
            pub type [<$level_f Simple>] = Shake<$n, $m_f, Simple>;

            impl<V: Variant> WotsParams for Shake<$n, $m_s, V> {
                type WotsMsgLen = U<{ $wots_msg }>;
                type WotsSigLen = U<{ $wots_sig }>;
            }
            impl<V: Variant> WotsParams for Shake<$n, $m_f, V> {
                type WotsMsgLen = U<{ $wots_msg }>;
                type WotsSigLen = U<{ $wots_sig }>;
            }
            impl<V: Variant> XmssParams for Shake<$n, $m_s, V> {
                type HPrime = U<$hprime_s>;
            }
            impl<V: Variant> XmssParams for Shake<$n, $m_f, V> {
                type HPrime = U<$hprime_f>;
            }
            impl<V: Variant> HypertreeParams for Shake<$n, $m_s, V> {
                type D = U<$d_s>;
                type H = U<$h_s>;
            }
            impl<V: Variant> HypertreeParams for Shake<$n, $m_f, V> {
                type D = U<$d_f>;
                type H = U<$h_f>;
            }
            impl<V: Variant> ForsParams for Shake<$n, $m_s, V> {
                type K = U<$k_s>;
                type A = U<$a_s>;
                type MD = U<$md_s>;
            }
            impl<V: Variant> ForsParams for Shake<$n, $m_f, V> {
                type K = U<$k_f>;
                type A = U<$a_f>;
                type MD = U<$md_f>;
            }

            impl ParameterSet for [<$level_s Robust>] {
                const NAME: &'static str = concat!($name_s, "-robust");
            }
            impl ParameterSet for [<$level_s Simple>] {
                const NAME: &'static str = concat!($name_s, "-simple");
            }
            impl ParameterSet for [<$level_f Robust>] {
                const NAME: &'static str = concat!($name_f, "-robust");
            }
            impl ParameterSet for [<$level_f Simple>] {
                const NAME: &'static str = concat!($name_f, "-simple");
            }
        }
    };
}

param_set!(
    Shake128s, Shake128f, U16, U30, U34,
    32, 35,
    9, 3,
    7, 22,
    63, 66,
    14, 12, { (12 * 14usize).div_ceil(8) },
    33, 6, { (6 * 33usize).div_ceil(8) },
    "SPHINCS+-SHAKE-128s", "SPHINCS+-SHAKE-128f"
);

param_set!(
    Shake192s, Shake192f, U24, U39, U42,
    { 24 * 2 }, { 24 * 2 + 3 },
    9, 3,
    7, 22,
    63, 66,
    17, 14, { (14 * 17usize).div_ceil(8) },
    33, 8, { (8 * 33usize).div_ceil(8) },
    "SPHINCS+-SHAKE-192s", "SPHINCS+-SHAKE-192f"
);

param_set!(
    Shake256s, Shake256f, U32, U47, U49,
    { 32 * 2 }, { 32 * 2 + 3 },
    8, 4,
    8, 17,
    64, 68,
    22, 14, { (14 * 22usize).div_ceil(8) },
    35, 9, { (9 * 35usize).div_ceil(8) },
    "SPHINCS+-SHAKE-256s", "SPHINCS+-SHAKE-256f"
);
