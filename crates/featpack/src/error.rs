//! Error types for packing and binarization.

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Broad failure category of a [`CodecError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters: bits per key, word widths, borders, block sizes.
    Config,
    /// A value or bin index does not fit the declared width.
    Range,
    /// A value is outside the domain accepted by the NaN policy.
    Domain,
}

/// Packing and binarization error.
///
/// All errors are fail-fast: the enclosing bulk operation is aborted and no
/// partial result is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// bits_per_key must be in 1..=31.
    #[error("bits per key must be in 1..=31, got {0}")]
    InvalidBitsPerKey(u32),

    /// Input element type is wider than the storage word.
    #[error("element of {element_bits} bits does not fit a {word_bits}-bit word")]
    ElementTooWide { element_bits: u32, word_bits: u32 },

    /// Packed word slice is shorter than the entry count requires.
    #[error("packed buffer holds {got} words, {expected} needed")]
    PackedTooShort { expected: usize, got: usize },

    /// Borders are not in ascending order (or contain NaN).
    #[error("borders must be ascending and not NaN, violated at index {index}")]
    UnsortedBorders { index: usize },

    /// Invalid codec configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// Thread pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// A key has more bits than bits_per_key allows.
    #[error("key {value} at index {index} does not fit in {bits_per_key} bits")]
    ValueOverflow {
        index: usize,
        value: u64,
        bits_per_key: u32,
    },

    /// Unpack target type is narrower than the packed keys.
    #[error("cannot unpack {bits_per_key}-bit keys into a {target_bits}-bit type")]
    TargetTooNarrow { bits_per_key: u32, target_bits: u32 },

    /// Bin index exceeds the capacity of the output type.
    #[error("bin {bin} does not fit a {target_bits}-bit bin type ({n_borders} borders)")]
    BinOverflow {
        bin: u64,
        target_bits: u32,
        n_borders: usize,
    },

    /// NaN value under a policy that forbids NaN.
    #[error("NaN values are forbidden for this feature")]
    NanForbidden,

    /// Per-element failure inside a bulk operation.
    #[error("at index {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attach the position of the offending element.
    pub fn at(self, index: usize) -> Self {
        CodecError::AtIndex {
            index,
            source: Box::new(self),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBitsPerKey(_)
            | Self::ElementTooWide { .. }
            | Self::PackedTooShort { .. }
            | Self::UnsortedBorders { .. }
            | Self::InvalidConfig(_)
            | Self::ThreadPool(_) => ErrorKind::Config,
            Self::ValueOverflow { .. }
            | Self::TargetTooNarrow { .. }
            | Self::BinOverflow { .. } => ErrorKind::Range,
            Self::NanForbidden => ErrorKind::Domain,
            Self::AtIndex { source, .. } => source.kind(),
        }
    }

    /// Index of the offending element, if the error carries one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ValueOverflow { index, .. } | Self::AtIndex { index, .. } => Some(*index),
            _ => None,
        }
    }
}
