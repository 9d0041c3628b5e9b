//! Integer widths used for packed storage and unpacked entries.

use std::fmt::Debug;

/// Storage unit of a packed buffer.
///
/// Implemented for `u32` and `u64`. All bit arithmetic is done in `u64` and
/// narrowed back, which is lossless because merged entries never exceed
/// `BITS` bits.
pub trait PackWord: Copy + Default + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Width of the word in bits.
    const BITS: u32;

    /// Widen to `u64`.
    fn to_u64(self) -> u64;

    /// Narrow from `u64`; only the low `BITS` bits are kept.
    fn from_u64(value: u64) -> Self;
}

/// Unsigned integer type for unpacked entries and bin indices.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`.
pub trait BinValue: Copy + Default + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Width of the type in bits.
    const BITS: u32;

    /// Widen to `u64`.
    fn to_u64(self) -> u64;

    /// Narrow from `u64`, or `None` if the value does not round-trip.
    fn try_from_u64(value: u64) -> Option<Self>;

    /// Narrow from `u64`, keeping only the low `BITS` bits.
    fn wrapping_from_u64(value: u64) -> Self;
}

macro_rules! impl_pack_word {
    ($($t:ty),*) => {$(
        impl PackWord for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_bin_value {
    ($($t:ty),*) => {$(
        impl BinValue for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn try_from_u64(value: u64) -> Option<Self> {
                <$t>::try_from(value).ok()
            }

            #[inline]
            fn wrapping_from_u64(value: u64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_pack_word!(u32, u64);
impl_bin_value!(u8, u16, u32, u64);
