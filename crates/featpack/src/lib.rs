//! featpack: fixed-width bit packing and border binarization for numeric
//! feature columns.
//!
//! Continuous feature values are mapped to discrete bin indices against
//! sorted borders, then the bin indices are packed into dense words using
//! the smallest key width that holds every bin.
//!
//! # Key Types
//!
//! - [`BorderTable`] / [`NanMode`] / [`Quantizer`] - value to bin mapping
//! - [`BitLayout`] / [`PackedBuffer`] - packed key storage
//! - [`CodecConfig`] - thread count and block sizes
//! - [`FeaturePacker`] - binarize and pack a column in one call
//!
//! # Bulk Operations
//!
//! - [`binarize_all`] - values to bin indices
//! - [`compress`] / [`decompress`] - bin indices to packed words and back
//!
//! All bulk operations run on rayon, split into independent blocks, and fail
//! as a whole on the first invalid element.

pub mod binning;
pub mod config;
pub mod error;
pub mod packing;
pub mod pipeline;
pub mod testing;
pub mod types;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use binning::{BorderTable, NanMode, Quantizer, binarize_all, quantize};
pub use config::CodecConfig;
pub use error::{CodecError, ErrorKind, Result};
pub use packing::{BitLayout, PackedBuffer, compress, decompress};
pub use pipeline::{FeaturePacker, PackedFeature, bits_for_bins};
pub use types::{BinValue, PackWord};
pub use utils::{Parallelism, run_with_threads};
