//! Parallel binarization of value buffers.

use tracing::debug;

use super::borders::BorderTable;
use super::nan_mode::NanMode;
use super::quantizer::Quantizer;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::types::BinValue;
use crate::utils::{Parallelism, run_with_threads};

/// Binarize every value in `values` into a bin index of type `B`.
///
/// Blocks of `config.block_size` values run independently; each output
/// slot has a single writer. The call is all-or-nothing: the first failure
/// observed is returned wrapped in [`CodecError::AtIndex`] and the partial
/// output is dropped.
///
/// Runs on a pool of `config.n_threads` threads (see [`run_with_threads`]).
///
/// [`CodecError::AtIndex`]: crate::CodecError::AtIndex
///
/// # Example
///
/// ```
/// use featpack::{binarize_all, BorderTable, CodecConfig, NanMode};
///
/// let borders = BorderTable::new(vec![1.0, 3.0]).unwrap();
/// let config = CodecConfig::default();
/// let bins: Vec<u8> =
///     binarize_all(&[0.5, f32::NAN, 4.0], NanMode::Min, &borders, &config).unwrap();
/// assert_eq!(bins, vec![1, 0, 3]);
/// ```
pub fn binarize_all<B: BinValue>(
    values: &[f32],
    nan_mode: NanMode,
    borders: &BorderTable,
    config: &CodecConfig,
) -> Result<Vec<B>> {
    config.validate()?;
    run_with_threads(config.n_threads, |parallelism| {
        binarize_with(values, nan_mode, borders, config, parallelism)
    })?
}

/// [`binarize_all`] on the current pool. `config` must already be validated.
pub(crate) fn binarize_with<B: BinValue>(
    values: &[f32],
    nan_mode: NanMode,
    borders: &BorderTable,
    config: &CodecConfig,
    parallelism: Parallelism,
) -> Result<Vec<B>> {
    debug_assert!(config.validate().is_ok());
    let quantizer = Quantizer::new(borders, nan_mode);
    let block_size = config.block_size;

    debug!(
        n = values.len(),
        n_borders = borders.len(),
        ?nan_mode,
        target_bits = B::BITS,
        threads = rayon::current_num_threads(),
        "binarize"
    );

    let mut out = vec![B::default(); values.len()];
    parallelism
        .maybe_par_try_chunks_mut(&mut out, block_size, |block, chunk| {
            let start = block * block_size;
            for (offset, slot) in chunk.iter_mut().enumerate() {
                let idx = start + offset;
                *slot = quantizer.bin(values[idx]).map_err(|err| err.at(idx))?;
            }
            Ok(())
        })
        .inspect_err(|err| debug!(%err, "binarize failed"))?;

    Ok(out)
}
