//! Binarize-then-pack for whole feature columns.

use tracing::debug;

use crate::binning::{BorderTable, NanMode, Quantizer, binarize_with};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::packing::{PackedBuffer, compress_with};
use crate::types::{BinValue, PackWord};
use crate::utils::run_with_threads;

/// Bits needed to store `n_bins` distinct bin indices: `ceil(log2(n_bins))`.
///
/// Returns 0 for `n_bins <= 1`.
#[inline]
pub fn bits_for_bins(n_bins: usize) -> u32 {
    if n_bins <= 1 {
        0
    } else {
        usize::BITS - (n_bins - 1).leading_zeros()
    }
}

/// A binarized and packed feature column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFeature<W: PackWord> {
    packed: PackedBuffer<W>,
    nan_mode: NanMode,
    n_bins: usize,
}

impl<W: PackWord> PackedFeature<W> {
    #[inline]
    pub fn packed(&self) -> &PackedBuffer<W> {
        &self.packed
    }

    #[inline]
    pub fn nan_mode(&self) -> NanMode {
        self.nan_mode
    }

    /// Number of bins the quantizer could produce, including the NaN bin.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.packed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// Bin of row `idx`.
    #[inline]
    pub fn bin(&self, idx: usize) -> Option<u64> {
        self.packed.get(idx)
    }

    /// Decode all bins into `B` values.
    pub fn bins<B: BinValue>(&self, config: &CodecConfig) -> Result<Vec<B>> {
        self.packed.unpack(config)
    }

    pub fn into_packed(self) -> PackedBuffer<W> {
        self.packed
    }
}

/// Binarizes a value column against its borders and packs the bins with the
/// smallest key width that holds every possible bin.
///
/// Runs inside a thread pool sized by [`CodecConfig::n_threads`].
///
/// # Example
///
/// ```
/// use featpack::{BorderTable, CodecConfig, FeaturePacker, NanMode};
///
/// let borders = BorderTable::new(vec![1.0, 3.0]).unwrap();
/// let packer = FeaturePacker::new(CodecConfig::default());
/// let feature = packer
///     .pack::<u64>(&[0.5, f32::NAN, 4.0], NanMode::Min, &borders)
///     .unwrap();
///
/// // 4 bins (NaN + 3 value bins) need 2 bits
/// assert_eq!(feature.packed().bits_per_key(), 2);
/// assert_eq!(feature.bins::<u8>(&CodecConfig::default()).unwrap(), vec![1, 0, 3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FeaturePacker {
    config: CodecConfig,
}

impl FeaturePacker {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Key width used for a given border table and NaN policy.
    pub fn bits_per_key(borders: &BorderTable, nan_mode: NanMode) -> u32 {
        bits_for_bins(Quantizer::new(borders, nan_mode).n_bins()).max(1)
    }

    /// Binarize `values` and pack the resulting bins.
    pub fn pack<W: PackWord>(
        &self,
        values: &[f32],
        nan_mode: NanMode,
        borders: &BorderTable,
    ) -> Result<PackedFeature<W>> {
        self.config.validate()?;
        let n_bins = Quantizer::new(borders, nan_mode).n_bins();
        let bits_per_key = Self::bits_per_key(borders, nan_mode);
        debug!(n = values.len(), n_bins, bits_per_key, "pack feature");

        // One pool for both passes; the inner calls reuse it.
        run_with_threads(self.config.n_threads, |parallelism| -> Result<PackedFeature<W>> {
            let bins: Vec<u32> =
                binarize_with(values, nan_mode, borders, &self.config, parallelism)?;
            let packed = compress_with::<u32, W>(&bins, bits_per_key, &self.config, parallelism)?;
            Ok(PackedFeature {
                packed,
                nan_mode,
                n_bins,
            })
        })?
    }
}
