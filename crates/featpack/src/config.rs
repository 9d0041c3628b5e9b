//! Codec configuration.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Default number of words per compress block.
pub const DEFAULT_BLOCK_WORDS: usize = 8192;

/// Default number of entries per decompress / binarize block.
pub const DEFAULT_BLOCK_SIZE: usize = 16384;

/// Largest accepted `block_words`. A block spans at most
/// `block_words * 64` entries, which must fit in `usize`.
pub const MAX_BLOCK_WORDS: usize = usize::MAX / 64;

/// Configuration shared by the bulk operations.
///
/// # Example
///
/// ```
/// use featpack::CodecConfig;
///
/// // Defaults: auto threads, 8192 words per compress block
/// let config = CodecConfig::default();
/// assert_eq!(config.block_words, 8192);
///
/// // Sequential, small blocks
/// let config = CodecConfig::builder()
///     .n_threads(1)
///     .block_words(4)
///     .block_size(64)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(derive(Clone, Debug))]
#[serde(default)]
pub struct CodecConfig {
    /// Thread count: 0 = ambient rayon pool, 1 = sequential, n = a pool of
    /// exactly n threads (default: 0).
    #[builder(default = 0)]
    pub n_threads: usize,
    /// Whole words per compress block (default: 8192, at most
    /// [`MAX_BLOCK_WORDS`]).
    ///
    /// A block covers `block_words * entries_per_word` entries, so no two
    /// blocks ever share a word.
    #[builder(default = DEFAULT_BLOCK_WORDS)]
    pub block_words: usize,
    /// Entries per decompress and binarize block (default: 16384).
    #[builder(default = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CodecConfig {
    /// Sequential configuration with default block sizes.
    pub fn sequential() -> Self {
        Self::builder().n_threads(1).build()
    }

    /// Check block sizes.
    pub fn validate(&self) -> Result<()> {
        if self.block_words == 0 {
            return Err(CodecError::InvalidConfig("block_words must be > 0"));
        }
        if self.block_words > MAX_BLOCK_WORDS {
            return Err(CodecError::InvalidConfig("block_words is too large"));
        }
        if self.block_size == 0 {
            return Err(CodecError::InvalidConfig("block_size must be > 0"));
        }
        Ok(())
    }
}
