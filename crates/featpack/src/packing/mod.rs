//! Fixed-width bit packing.
//!
//! Keys of `bits_per_key` bits (1..=31) are packed into an array of storage
//! words (`u32` or `u64`). A word holds `W::BITS / bits_per_key` whole keys,
//! most significant first; keys never cross word boundaries.
//!
//! - [`BitLayout`] - where entry `i` lives (word index, shift, mask)
//! - [`PackedBuffer`] - owned packed words with their layout and length
//! - [`compress`] / [`decompress`] - parallel bulk encode and decode

mod buffer;
mod codec;
mod layout;

pub use buffer::PackedBuffer;
pub use codec::{compress, decompress};
pub(crate) use codec::compress_with;
pub use layout::{BitLayout, MAX_BITS_PER_KEY};
