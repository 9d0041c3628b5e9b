//! NaN handling policy.

use serde::{Deserialize, Serialize};

/// How NaN values of a feature are binarized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NanMode {
    /// NaN is an error.
    #[default]
    Forbidden,
    /// NaN gets bin 0; real values are shifted up by one.
    Min,
    /// NaN gets the last bin, shared with values above every border.
    Max,
}

impl NanMode {
    /// Whether NaN values are accepted.
    #[inline]
    pub fn allows_nan(self) -> bool {
        !matches!(self, NanMode::Forbidden)
    }

    /// Extra bins reserved for NaN on top of `n_borders + 1`.
    #[inline]
    pub fn reserved_bins(self) -> usize {
        match self {
            NanMode::Min => 1,
            NanMode::Forbidden | NanMode::Max => 0,
        }
    }
}
