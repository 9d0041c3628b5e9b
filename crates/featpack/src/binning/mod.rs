//! Border binarization of continuous values.
//!
//! - [`BorderTable`] - ascending thresholds, applied as given
//! - [`NanMode`] - whether NaN is an error, the lowest bin, or the highest bin
//! - [`Quantizer`] / [`quantize`] - one value to one bin index
//! - [`binarize_all`] - parallel binarization of a whole column
//!
//! Bin indices are produced in a caller-chosen width (`u8`, `u16`, `u32`,
//! `u64`); a bin that does not fit the chosen width is an error, never a
//! silent truncation.

mod borders;
mod bulk;
mod nan_mode;
mod quantizer;

pub use borders::BorderTable;
pub use bulk::binarize_all;
pub(crate) use bulk::binarize_with;
pub use nan_mode::NanMode;
pub use quantizer::{Quantizer, quantize};
