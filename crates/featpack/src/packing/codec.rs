//! Parallel compress / decompress of fixed-width keys.

use tracing::debug;

use super::buffer::PackedBuffer;
use super::layout::BitLayout;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::types::{BinValue, PackWord};
use crate::utils::{Parallelism, run_with_threads};

/// Pack `values` into `bits_per_key`-bit keys stored in `W` words.
///
/// The word array is split into blocks of `config.block_words` whole words.
/// Every block is written by exactly one worker and covers
/// `block_words * entries_per_word` consecutive entries, so words are never
/// shared between workers and the OR-merge needs no synchronization. The
/// result does not depend on the block size or the number of threads.
///
/// Runs on a pool of `config.n_threads` threads (see [`run_with_threads`]).
///
/// # Errors
///
/// - [`CodecError::InvalidBitsPerKey`] if `bits_per_key` is 0 or above 31.
/// - [`CodecError::ElementTooWide`] if `T` is wider than `W`.
/// - [`CodecError::ValueOverflow`] for the first value observed with more
///   than `bits_per_key` significant bits.
///
/// # Example
///
/// ```
/// use featpack::{compress, decompress, CodecConfig};
///
/// let config = CodecConfig::default();
/// let packed = compress::<u8, u64>(&[1, 2, 3, 4], 3, &config).unwrap();
/// assert_eq!(packed.words().len(), 1);
///
/// let values: Vec<u8> = decompress(packed.words(), 4, 3, &config).unwrap();
/// assert_eq!(values, vec![1, 2, 3, 4]);
/// ```
pub fn compress<T, W>(
    values: &[T],
    bits_per_key: u32,
    config: &CodecConfig,
) -> Result<PackedBuffer<W>>
where
    T: BinValue,
    W: PackWord,
{
    config.validate()?;
    run_with_threads(config.n_threads, |parallelism| {
        compress_with(values, bits_per_key, config, parallelism)
    })?
}

/// [`compress`] on the current pool. `config` must already be validated.
pub(crate) fn compress_with<T, W>(
    values: &[T],
    bits_per_key: u32,
    config: &CodecConfig,
    parallelism: Parallelism,
) -> Result<PackedBuffer<W>>
where
    T: BinValue,
    W: PackWord,
{
    debug_assert!(config.validate().is_ok());
    let layout = BitLayout::<W>::new(bits_per_key)?;
    if T::BITS > W::BITS {
        return Err(CodecError::ElementTooWide {
            element_bits: T::BITS,
            word_bits: W::BITS,
        });
    }

    let n = values.len();
    let entries_per_word = layout.entries_per_word();
    let mut words = vec![W::default(); layout.packed_len(n)];
    // Bounded by validate(): block_words * 64 cannot overflow.
    let block_words = config.block_words.min(words.len().max(1));
    let block_entries = block_words * entries_per_word;

    debug!(
        n,
        bits_per_key,
        word_bits = W::BITS,
        n_words = words.len(),
        block_words,
        threads = rayon::current_num_threads(),
        "compress"
    );

    parallelism
        .maybe_par_try_chunks_mut(&mut words, block_words, |block, chunk| {
            let start = block * block_entries;
            let end = (start + chunk.len() * entries_per_word).min(n);
            let first_word = block * block_words;

            for (offset, value) in values[start..end].iter().enumerate() {
                let idx = start + offset;
                let value = value.to_u64();
                if !layout.fits(value) {
                    return Err(CodecError::ValueOverflow {
                        index: idx,
                        value,
                        bits_per_key,
                    });
                }
                layout.merge(&mut chunk[layout.word_index(idx) - first_word], idx, value);
            }
            Ok(())
        })
        .inspect_err(|err| debug!(%err, "compress failed"))?;

    Ok(PackedBuffer::from_parts(words.into_boxed_slice(), layout, n))
}

/// Unpack `count` keys of `bits_per_key` bits from `words` into `T` values.
///
/// Each output slot is computed independently from the read-only input, so
/// blocks of `config.block_size` entries run in parallel without constraints.
/// Runs on a pool of `config.n_threads` threads.
///
/// # Errors
///
/// - [`CodecError::InvalidBitsPerKey`] if `bits_per_key` is 0 or above 31.
/// - [`CodecError::TargetTooNarrow`] if `bits_per_key > T::BITS`.
/// - [`CodecError::PackedTooShort`] if `words` cannot hold `count` keys.
pub fn decompress<W, T>(
    words: &[W],
    count: usize,
    bits_per_key: u32,
    config: &CodecConfig,
) -> Result<Vec<T>>
where
    W: PackWord,
    T: BinValue,
{
    config.validate()?;
    let layout = BitLayout::<W>::new(bits_per_key)?;
    if bits_per_key > T::BITS {
        return Err(CodecError::TargetTooNarrow {
            bits_per_key,
            target_bits: T::BITS,
        });
    }
    let expected = layout.packed_len(count);
    if words.len() < expected {
        return Err(CodecError::PackedTooShort {
            expected,
            got: words.len(),
        });
    }

    debug!(count, bits_per_key, word_bits = W::BITS, target_bits = T::BITS, "decompress");

    let block_size = config.block_size;
    run_with_threads(config.n_threads, |parallelism| {
        let mut out = vec![T::default(); count];
        parallelism.maybe_par_chunks_mut(&mut out, block_size, |block, chunk| {
            let start = block * block_size;
            for (offset, slot) in chunk.iter_mut().enumerate() {
                *slot = T::wrapping_from_u64(layout.extract(words, start + offset));
            }
        });
        out
    })
}

impl<W: PackWord> PackedBuffer<W> {
    /// Decompress every entry into `T` values.
    ///
    /// Same as [`decompress`] on this buffer's words, length and key width.
    pub fn unpack<T: BinValue>(&self, config: &CodecConfig) -> Result<Vec<T>> {
        decompress(self.words(), self.len(), self.bits_per_key(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn small_blocks(n_threads: usize) -> CodecConfig {
        CodecConfig::builder()
            .n_threads(n_threads)
            .block_words(2)
            .block_size(5)
            .build()
    }

    #[test]
    fn packs_msb_first() {
        let config = CodecConfig::sequential();
        let packed = compress::<u8, u32>(&[1, 2, 3, 4, 5], 8, &config).unwrap();
        assert_eq!(packed.words(), &[0x0102_0304, 0x0500_0000]);
    }

    #[test]
    fn packing_density() {
        let values = vec![0u8; 100];
        let packed = compress::<u8, u64>(&values, 5, &CodecConfig::default()).unwrap();
        assert_eq!(packed.layout().entries_per_word(), 12);
        assert_eq!(packed.words().len(), 9);
        assert_eq!(packed.len(), 100);
    }

    #[test]
    fn roundtrip_across_blocks() {
        let values: Vec<u16> = (0..1000u16).map(|i| i % 128).collect();
        for config in [small_blocks(1), small_blocks(4), CodecConfig::default()] {
            let packed = compress::<u16, u64>(&values, 7, &config).unwrap();
            let out: Vec<u16> = packed.unpack(&config).unwrap();
            assert_eq!(out, values);
        }
    }

    #[test]
    fn overflow_reports_index_and_value() {
        let values = [1u32, 7, 8, 2];
        let err = compress::<u32, u64>(&values, 3, &CodecConfig::sequential()).unwrap_err();
        assert_eq!(
            err,
            CodecError::ValueOverflow {
                index: 2,
                value: 8,
                bits_per_key: 3
            }
        );
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn rejects_zero_and_wide_bits() {
        let config = CodecConfig::default();
        assert_eq!(
            compress::<u8, u64>(&[0], 0, &config).unwrap_err(),
            CodecError::InvalidBitsPerKey(0)
        );
        assert_eq!(
            compress::<u8, u64>(&[0], 32, &config).unwrap_err(),
            CodecError::InvalidBitsPerKey(32)
        );
    }

    #[test]
    fn rejects_element_wider_than_word() {
        let err = compress::<u64, u32>(&[1], 4, &CodecConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CodecError::ElementTooWide {
                element_bits: 64,
                word_bits: 32
            }
        );
    }

    #[test]
    fn empty_input() {
        let packed = compress::<u8, u64>(&[], 4, &CodecConfig::default()).unwrap();
        assert!(packed.is_empty());
        assert!(packed.words().is_empty());
        let out: Vec<u8> = packed.unpack(&CodecConfig::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn decompress_rejects_narrow_target() {
        let packed = compress::<u16, u64>(&[300, 400], 9, &CodecConfig::default()).unwrap();
        let err = packed.unpack::<u8>(&CodecConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CodecError::TargetTooNarrow {
                bits_per_key: 9,
                target_bits: 8
            }
        );
    }

    #[test]
    fn decompress_rejects_short_buffer() {
        let words = [0u64; 2];
        let err = decompress::<u64, u32>(&words, 100, 5, &CodecConfig::default()).unwrap_err();
        assert_eq!(err, CodecError::PackedTooShort { expected: 9, got: 2 });
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn decompress_prefix() {
        let config = CodecConfig::sequential();
        let packed = compress::<u8, u32>(&[1, 2, 3, 4, 5], 8, &config).unwrap();
        let out: Vec<u8> = decompress(packed.words(), 3, 8, &config).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn huge_block_words_is_rejected() {
        let config: CodecConfig =
            serde_json::from_str(r#"{"n_threads": 1, "block_words": 18446744073709551615}"#)
                .unwrap();
        let values: Vec<u8> = (0..100).map(|i| i % 16).collect();
        let err = compress::<u8, u64>(&values, 4, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let config = CodecConfig::builder()
            .n_threads(1)
            .block_words(crate::config::MAX_BLOCK_WORDS)
            .build();
        let packed = compress::<u8, u64>(&values, 4, &config).unwrap();
        assert_eq!(packed.unpack::<u8>(&config).unwrap(), values);
    }

    #[test]
    fn same_words_for_every_thread_count() {
        let values: Vec<u32> = (0..5000u32).map(|i| (i * 2_654_435_761) >> 21).collect();
        let expected = compress::<u32, u64>(&values, 11, &small_blocks(1)).unwrap();
        for n_threads in [2, 3, 4] {
            let config = small_blocks(n_threads);
            let packed = compress::<u32, u64>(&values, 11, &config).unwrap();
            assert_eq!(packed, expected, "n_threads = {n_threads}");
            assert_eq!(packed.unpack::<u32>(&config).unwrap(), values);
        }
    }

    #[test]
    fn runs_on_a_pool_of_n_threads() {
        let config = small_blocks(3);
        let (packed, threads) = run_with_threads(config.n_threads, |parallelism| {
            let packed = compress_with::<u8, u32>(&[1, 2, 3], 4, &config, parallelism);
            (packed, rayon::current_num_threads())
        })
        .unwrap();
        assert_eq!(threads, 3);
        assert_eq!(packed.unwrap().get(2), Some(3));
    }

    #[test]
    fn decompress_is_pure() {
        let config = small_blocks(2);
        let values: Vec<u8> = (0..50).collect();
        let packed = compress::<u8, u32>(&values, 6, &config).unwrap();
        let before = packed.clone();
        let first: Vec<u8> = packed.unpack(&config).unwrap();
        let second: Vec<u8> = packed.unpack(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(packed, before);
    }
}
