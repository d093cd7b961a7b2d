//! # splice-descriptors
//!
//! Decoding and encoding of SCTE-35 splice descriptors.
//!
//! A splice descriptor is the tag-length-value structure carried in the
//! descriptor loop of a SCTE-35 splice info section. This crate decodes the
//! four standard kinds (avail, DTMF, segmentation and time) from a bit-level
//! reader, writes them back with a matching bit writer, and renders them as
//! JSON through `serde`.
//!
//! ## Decoding
//!
//! ```rust
//! use splice_descriptors::parse_splice_descriptor;
//!
//! let bytes = [0x00, 0x08, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35];
//! let (descriptor, consumed) = parse_splice_descriptor(&bytes).unwrap();
//!
//! assert_eq!(consumed, 10);
//! assert_eq!(descriptor.name(), "Avail Descriptor");
//! assert_eq!(descriptor.avail().unwrap().provider_avail_id, 309);
//! ```
//!
//! ## Encoding
//!
//! ```rust
//! use splice_descriptors::{AvailDescriptor, Encodable, SpliceDescriptor};
//!
//! let descriptor = SpliceDescriptor::cuei(AvailDescriptor { provider_avail_id: 309 }).unwrap();
//! let bytes = descriptor.encode_to_vec().unwrap();
//!
//! assert_eq!(bytes, [0x00, 0x08, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35]);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize` for descriptors and [`SpliceDescriptor::to_json`].
//! - `base64`: [`Encodable::encode_base64`].
//! - `cli`: the `splice-descriptors` command line tool.

pub mod bit_reader;
pub mod descriptors;
pub mod encoding;
pub mod error;
pub mod fmt;
pub mod pids;
pub mod tables;
pub mod upid;

#[cfg(feature = "serde")]
mod view;

pub use bit_reader::BitReader;
pub use descriptors::{
    AvailDescriptor, DescriptorBody, DescriptorHeader, DtmfDescriptor, SegmentationDescriptor,
    SpliceDescriptor, TimeDescriptor, parse_descriptor_loop, parse_splice_descriptor,
};
pub use encoding::{BitWriter, Encodable, EncodingError, EncodingResult};
pub use error::{DecodeError, DecodeResult};
pub use pids::Pids;
pub use upid::{MidUpid, Upid};

/// Converts 90kHz clock ticks to seconds.
pub fn ticks_to_secs(value: u64) -> f64 {
    value as f64 / 90_000.0
}

/// Converts seconds to 90kHz clock ticks, rounding to the nearest tick.
pub fn secs_to_ticks(secs: f64) -> u64 {
    (secs * 90_000.0).round() as u64
}
