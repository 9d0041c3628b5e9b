//! Bit layout of fixed-width keys inside storage words.

use std::marker::PhantomData;

use crate::error::{CodecError, Result};
use crate::types::PackWord;
use crate::utils::ceil_div;

/// Largest supported key width.
pub const MAX_BITS_PER_KEY: u32 = 31;

/// Position of fixed-width keys within an array of `W` words.
///
/// Each word holds `entries_per_word = W::BITS / bits_per_key` whole keys,
/// most significant entry first. Keys never straddle a word boundary; the
/// low `W::BITS % bits_per_key` bits of every word stay zero.
///
/// ```text
/// u64 word, bits_per_key = 5, entries_per_word = 12
/// | e0 (59..64) | e1 (54..59) | ... | e11 (4..9) | unused (0..4) |
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct BitLayout<W> {
    bits_per_key: u32,
    entries_per_word: usize,
    _word: PhantomData<W>,
}

impl<W> Clone for BitLayout<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for BitLayout<W> {}

impl<W: PackWord> BitLayout<W> {
    /// Create a layout for `bits_per_key`-bit keys.
    ///
    /// Fails with [`CodecError::InvalidBitsPerKey`] unless `1 <= bits_per_key <= 31`.
    pub fn new(bits_per_key: u32) -> Result<Self> {
        if bits_per_key == 0 || bits_per_key > MAX_BITS_PER_KEY {
            return Err(CodecError::InvalidBitsPerKey(bits_per_key));
        }
        Ok(Self {
            bits_per_key,
            entries_per_word: (W::BITS / bits_per_key) as usize,
            _word: PhantomData,
        })
    }

    #[inline]
    pub fn bits_per_key(&self) -> u32 {
        self.bits_per_key
    }

    #[inline]
    pub fn entries_per_word(&self) -> usize {
        self.entries_per_word
    }

    /// `(1 << bits_per_key) - 1`.
    #[inline]
    pub fn mask(&self) -> u64 {
        (1u64 << self.bits_per_key) - 1
    }

    /// Word holding entry `i`.
    #[inline]
    pub fn word_index(&self, i: usize) -> usize {
        i / self.entries_per_word
    }

    /// Right shift that brings entry `i` to the low bits of its word.
    #[inline]
    pub fn bit_shift(&self, i: usize) -> u32 {
        ((self.entries_per_word - i % self.entries_per_word - 1) as u32) * self.bits_per_key
    }

    /// Number of words needed for `n` entries.
    #[inline]
    pub fn packed_len(&self, n: usize) -> usize {
        ceil_div(n, self.entries_per_word)
    }

    /// Whether `value` fits in `bits_per_key` bits.
    #[inline]
    pub fn fits(&self, value: u64) -> bool {
        value & self.mask() == value
    }

    /// Read entry `i`.
    ///
    /// # Panics
    /// Panics if `words` is shorter than `word_index(i) + 1`.
    #[inline]
    pub fn extract(&self, words: &[W], i: usize) -> u64 {
        (words[self.word_index(i)].to_u64() >> self.bit_shift(i)) & self.mask()
    }

    /// OR-merge `value` into `word` at the slot of entry `i`.
    ///
    /// Bits already set in `word` are kept, so a word is the union of all
    /// entries merged into it. The slot must still be zero; merging twice
    /// into the same slot yields the OR of both values. `value` must already
    /// satisfy [`fits`](Self::fits).
    #[inline]
    pub fn merge(&self, word: &mut W, i: usize, value: u64) {
        debug_assert!(self.fits(value));
        *word = W::from_u64(word.to_u64() | (value << self.bit_shift(i)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_bits() {
        assert_eq!(
            BitLayout::<u64>::new(0),
            Err(CodecError::InvalidBitsPerKey(0))
        );
        assert_eq!(
            BitLayout::<u64>::new(32),
            Err(CodecError::InvalidBitsPerKey(32))
        );
        assert!(BitLayout::<u64>::new(31).is_ok());
        assert!(BitLayout::<u32>::new(1).is_ok());
    }

    #[test]
    fn five_bits_in_u64() {
        let layout = BitLayout::<u64>::new(5).unwrap();
        assert_eq!(layout.entries_per_word(), 12);
        assert_eq!(layout.mask(), 0b11111);
        assert_eq!(layout.packed_len(100), 9);
        assert_eq!(layout.word_index(11), 0);
        assert_eq!(layout.word_index(12), 1);
        assert_eq!(layout.bit_shift(0), 55);
        assert_eq!(layout.bit_shift(11), 0);
        assert_eq!(layout.bit_shift(12), 55);
    }

    #[test]
    fn wide_keys_in_u32() {
        // 17 bits: one key per u32 word, 15 bits wasted
        let layout = BitLayout::<u32>::new(17).unwrap();
        assert_eq!(layout.entries_per_word(), 1);
        assert_eq!(layout.bit_shift(7), 0);
        assert_eq!(layout.packed_len(3), 3);
    }

    #[test]
    fn merge_accumulates() {
        let layout = BitLayout::<u32>::new(8).unwrap();
        let mut word = 0u32;
        layout.merge(&mut word, 0, 0xAB);
        layout.merge(&mut word, 3, 0xCD);
        layout.merge(&mut word, 1, 0x12);
        assert_eq!(word, 0xAB12_00CD);

        let words = [word];
        assert_eq!(layout.extract(&words, 0), 0xAB);
        assert_eq!(layout.extract(&words, 1), 0x12);
        assert_eq!(layout.extract(&words, 2), 0);
        assert_eq!(layout.extract(&words, 3), 0xCD);
    }

    #[test]
    fn fits() {
        let layout = BitLayout::<u64>::new(3).unwrap();
        assert!(layout.fits(7));
        assert!(!layout.fits(8));
    }
}
