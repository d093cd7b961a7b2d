//! Binary encoding of splice descriptors.
//!
//! The counterpart of the decoders: every descriptor kind that can be decoded
//! can be written back, with reserved bits emitted as zeros.

/// Error types for encoding operations.
pub mod error;

/// Bit-level writer for encoding binary data.
pub mod writer;

/// Trait definitions for encodable types.
pub mod traits;

mod descriptors;
mod upid;

#[cfg(test)]
mod tests;


pub use error::{EncodingError, EncodingResult};
pub use traits::Encodable;
pub use writer::BitWriter;
