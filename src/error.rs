//! Error types for decoding splice descriptors.

use thiserror::Error;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a splice descriptor.
///
/// Unknown descriptor tags and lookup table misses are not errors: the former
/// produce a header-only descriptor, the latter an empty label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bits remain in the buffer than the read requires.
    #[error(
        "truncated input at byte {} (bit {offset}): needed {requested} bits, {remaining} remaining",
        .offset / 8
    )]
    TruncatedInput {
        /// Bit offset at which the read was attempted.
        offset: usize,
        /// Number of bits requested.
        requested: usize,
        /// Number of bits left in the buffer.
        remaining: usize,
    },

    /// A read was requested with a width the field type cannot hold.
    #[error("invalid field width: {width} bits")]
    InvalidWidth {
        /// The rejected width in bits.
        width: usize,
    },

    /// The UPID sub-decoder rejected its payload.
    #[error("invalid segmentation UPID of type 0x{upid_type:02x}: {reason}")]
    InvalidUpid {
        /// The `segmentation_upid_type` being decoded.
        upid_type: u8,
        /// What was wrong with it.
        reason: String,
    },
}
