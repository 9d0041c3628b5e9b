//! Single-value binarization.

use super::borders::BorderTable;
use super::nan_mode::NanMode;
use crate::error::{CodecError, Result};
use crate::types::BinValue;

/// Maps values to bin indices against a border table under a NaN policy.
///
/// Bin assignment for `n` borders:
///
/// | value            | `Forbidden`  | `Min`          | `Max`        |
/// |------------------|--------------|----------------|--------------|
/// | NaN              | error        | `0`            | `n`          |
/// | `v` (not NaN)    | `#{b < v}`   | `#{b < v} + 1` | `#{b < v}`   |
#[derive(Clone, Copy, Debug)]
pub struct Quantizer<'a> {
    borders: &'a BorderTable,
    nan_mode: NanMode,
}

impl<'a> Quantizer<'a> {
    pub fn new(borders: &'a BorderTable, nan_mode: NanMode) -> Self {
        Self { borders, nan_mode }
    }

    #[inline]
    pub fn borders(&self) -> &'a BorderTable {
        self.borders
    }

    #[inline]
    pub fn nan_mode(&self) -> NanMode {
        self.nan_mode
    }

    /// Number of distinct bins this quantizer can produce.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.borders.n_value_bins() + self.nan_mode.reserved_bins()
    }

    /// Bin index of `value` as a `u64`, before narrowing.
    ///
    /// Includes the NaN policy and the `Min` shift, unlike
    /// [`BorderTable::raw_bin`].
    #[inline]
    pub fn bin_u64(&self, value: f32) -> Result<u64> {
        if value.is_nan() {
            return match self.nan_mode {
                NanMode::Forbidden => Err(CodecError::NanForbidden),
                NanMode::Min => Ok(0),
                NanMode::Max => Ok(self.borders.len() as u64),
            };
        }
        let bin = self.borders.raw_bin(value) as u64;
        Ok(match self.nan_mode {
            NanMode::Min => bin + 1,
            NanMode::Forbidden | NanMode::Max => bin,
        })
    }

    /// Bin index of `value` narrowed to `B`.
    ///
    /// # Errors
    /// - [`CodecError::NanForbidden`] for NaN under [`NanMode::Forbidden`].
    /// - [`CodecError::BinOverflow`] if the bin does not fit in `B`.
    #[inline]
    pub fn bin<B: BinValue>(&self, value: f32) -> Result<B> {
        let bin = self.bin_u64(value)?;
        B::try_from_u64(bin).ok_or(CodecError::BinOverflow {
            bin,
            target_bits: B::BITS,
            n_borders: self.borders.len(),
        })
    }
}

/// Bin index of a single value.
///
/// Shorthand for `Quantizer::new(borders, nan_mode).bin(value)`.
///
/// ```
/// use featpack::{quantize, BorderTable, NanMode};
///
/// let borders = BorderTable::new(vec![1.0, 3.0, 5.0]).unwrap();
/// assert_eq!(quantize::<u8>(3.0, &borders, NanMode::Forbidden).unwrap(), 1);
/// assert_eq!(quantize::<u8>(f32::NAN, &borders, NanMode::Min).unwrap(), 0);
/// ```
#[inline]
pub fn quantize<B: BinValue>(value: f32, borders: &BorderTable, nan_mode: NanMode) -> Result<B> {
    Quantizer::new(borders, nan_mode).bin(value)
}
