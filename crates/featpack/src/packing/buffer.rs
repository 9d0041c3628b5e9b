//! Owned packed storage.

use super::layout::BitLayout;
use crate::types::PackWord;

/// Packed keys together with their layout and logical length.
///
/// Produced by [`compress`](super::compress); owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBuffer<W: PackWord> {
    words: Box<[W]>,
    layout: BitLayout<W>,
    len: usize,
}

impl<W: PackWord> PackedBuffer<W> {
    pub(crate) fn from_parts(words: Box<[W]>, layout: BitLayout<W>, len: usize) -> Self {
        debug_assert_eq!(words.len(), layout.packed_len(len));
        Self { words, layout, len }
    }

    /// Number of logical entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bits_per_key(&self) -> u32 {
        self.layout.bits_per_key()
    }

    #[inline]
    pub fn layout(&self) -> &BitLayout<W> {
        &self.layout
    }

    /// Packed words.
    #[inline]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// Consume into the raw words.
    pub fn into_words(self) -> Box<[W]> {
        self.words
    }

    /// Entry at `idx`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u64> {
        (idx < self.len).then(|| self.layout.extract(&self.words, idx))
    }

    /// Iterate over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(|i| self.layout.extract(&self.words, i))
    }

    /// Memory size of the packed words in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.words.len() * (W::BITS / 8) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> PackedBuffer<u32> {
        let layout = BitLayout::<u32>::new(4).unwrap();
        // 8 entries per word: 0x12345678 holds 1..=8, second word holds 9 then zeros
        PackedBuffer::from_parts(vec![0x1234_5678, 0x9000_0000].into_boxed_slice(), layout, 9)
    }

    #[test]
    fn accessors() {
        let buf = buffer();
        assert_eq!(buf.len(), 9);
        assert!(!buf.is_empty());
        assert_eq!(buf.bits_per_key(), 4);
        assert_eq!(buf.words().len(), 2);
        assert_eq!(buf.size_bytes(), 8);
    }

    #[test]
    fn get_and_iter() {
        let buf = buffer();
        assert_eq!(buf.get(0), Some(1));
        assert_eq!(buf.get(7), Some(8));
        assert_eq!(buf.get(8), Some(9));
        assert_eq!(buf.get(9), None);
        assert_eq!(buf.iter().collect::<Vec<_>>(), (1..=9).collect::<Vec<u64>>());
    }
}
