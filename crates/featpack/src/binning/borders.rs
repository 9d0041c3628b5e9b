//! Sorted border tables.

use crate::error::{CodecError, Result};

/// Ascending thresholds splitting the real line into `len + 1` bins.
///
/// A non-NaN value `v` falls into bin `#{b : v > b}`, so a value equal to a
/// border belongs to the lower bin. Borders are computed elsewhere; this
/// type only checks that they are ordered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderTable {
    borders: Box<[f32]>,
}

impl BorderTable {
    /// Create a table, checking the borders are non-decreasing and not NaN.
    ///
    /// # Errors
    /// [`CodecError::UnsortedBorders`] with the index of the first offending border.
    pub fn new(borders: Vec<f32>) -> Result<Self> {
        if let Some(index) = borders.iter().position(|b| b.is_nan()) {
            return Err(CodecError::UnsortedBorders { index });
        }
        if let Some(index) = borders.windows(2).position(|w| w[0] > w[1]) {
            return Err(CodecError::UnsortedBorders { index: index + 1 });
        }
        Ok(Self {
            borders: borders.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.borders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.borders.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.borders
    }

    /// Number of bins for non-NaN values.
    #[inline]
    pub fn n_value_bins(&self) -> usize {
        self.borders.len() + 1
    }

    /// Number of borders strictly below `value`.
    ///
    /// `value` must not be NaN.
    #[inline]
    pub fn raw_bin(&self, value: f32) -> usize {
        debug_assert!(!value.is_nan());
        self.borders.partition_point(|&border| value > border)
    }
}

impl TryFrom<Vec<f32>> for BorderTable {
    type Error = CodecError;

    fn try_from(borders: Vec<f32>) -> Result<Self> {
        Self::new(borders)
    }
}

impl TryFrom<&[f32]> for BorderTable {
    type Error = CodecError;

    fn try_from(borders: &[f32]) -> Result<Self> {
        Self::new(borders.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bin_equal_stays_low() {
        let table = BorderTable::new(vec![1.0, 3.0, 5.0]).unwrap();
        assert_eq!(table.raw_bin(0.0), 0);
        assert_eq!(table.raw_bin(1.0), 0);
        assert_eq!(table.raw_bin(1.0001), 1);
        assert_eq!(table.raw_bin(3.0), 1);
        assert_eq!(table.raw_bin(5.0), 2);
        assert_eq!(table.raw_bin(5.5), 3);
        assert_eq!(table.raw_bin(f32::INFINITY), 3);
        assert_eq!(table.raw_bin(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn empty_table_single_bin() {
        let table = BorderTable::default();
        assert_eq!(table.n_value_bins(), 1);
        assert_eq!(table.raw_bin(42.0), 0);
    }

    #[test]
    fn duplicate_borders_allowed() {
        let table = BorderTable::new(vec![1.0, 1.0, 2.0]).unwrap();
        assert_eq!(table.raw_bin(1.0), 0);
        assert_eq!(table.raw_bin(1.5), 2);
    }

    #[test]
    fn rejects_unsorted() {
        assert_eq!(
            BorderTable::new(vec![1.0, 3.0, 2.0]),
            Err(CodecError::UnsortedBorders { index: 2 })
        );
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(
            BorderTable::try_from(&[1.0, f32::NAN][..]),
            Err(CodecError::UnsortedBorders { index: 1 })
        );
    }
}
