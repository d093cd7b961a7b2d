//! Splice descriptors and their decoders.
//!
//! A splice descriptor is a tag-length-value structure. Every kind starts with
//! the same header (tag, length and a 32-bit identifier, usually `"CUEI"`);
//! what follows depends on the tag:
//!
//! | tag  | descriptor                      |
//! |------|---------------------------------|
//! | 0x00 | [`AvailDescriptor`]             |
//! | 0x01 | [`DtmfDescriptor`]              |
//! | 0x02 | [`SegmentationDescriptor`]      |
//! | 0x03 | [`TimeDescriptor`]              |
//!
//! Any other tag decodes to a header-only descriptor.

mod avail;
mod dtmf;
mod segmentation;
mod time;

pub use avail::AvailDescriptor;
pub use dtmf::DtmfDescriptor;
pub use segmentation::SegmentationDescriptor;
pub use time::TimeDescriptor;

use crate::bit_reader::BitReader;
use crate::encoding::writer::ensure_fits;
use crate::encoding::{Encodable, EncodingResult};
use crate::error::{DecodeError, DecodeResult};
use log::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Tag of the avail descriptor.
pub const AVAIL_DESCRIPTOR_TAG: u8 = 0x00;
/// Tag of the DTMF descriptor.
pub const DTMF_DESCRIPTOR_TAG: u8 = 0x01;
/// Tag of the segmentation descriptor.
pub const SEGMENTATION_DESCRIPTOR_TAG: u8 = 0x02;
/// Tag of the time descriptor.
pub const TIME_DESCRIPTOR_TAG: u8 = 0x03;

/// The tag-specific part of a splice descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorBody {
    /// Tag 0x00.
    Avail(AvailDescriptor),
    /// Tag 0x01.
    Dtmf(DtmfDescriptor),
    /// Tag 0x02.
    Segmentation(SegmentationDescriptor),
    /// Tag 0x03.
    Time(TimeDescriptor),
    /// Any other tag; no body is decoded.
    Unknown(u8),
}

impl DescriptorBody {
    /// The `splice_descriptor_tag` selecting this body.
    pub fn tag(&self) -> u8 {
        match self {
            DescriptorBody::Avail(_) => AVAIL_DESCRIPTOR_TAG,
            DescriptorBody::Dtmf(_) => DTMF_DESCRIPTOR_TAG,
            DescriptorBody::Segmentation(_) => SEGMENTATION_DESCRIPTOR_TAG,
            DescriptorBody::Time(_) => TIME_DESCRIPTOR_TAG,
            DescriptorBody::Unknown(tag) => *tag,
        }
    }

    /// Human-readable name of the descriptor kind.
    pub fn name(&self) -> &'static str {
        match self {
            DescriptorBody::Avail(_) => "Avail Descriptor",
            DescriptorBody::Dtmf(_) => "DTMF Descriptor",
            DescriptorBody::Segmentation(_) => "Segmentation Descriptor",
            DescriptorBody::Time(_) => "Time Descriptor",
            DescriptorBody::Unknown(_) => "Unknown Descriptor",
        }
    }
}

impl From<AvailDescriptor> for DescriptorBody {
    fn from(descriptor: AvailDescriptor) -> Self {
        DescriptorBody::Avail(descriptor)
    }
}

impl From<DtmfDescriptor> for DescriptorBody {
    fn from(descriptor: DtmfDescriptor) -> Self {
        DescriptorBody::Dtmf(descriptor)
    }
}

impl From<SegmentationDescriptor> for DescriptorBody {
    fn from(descriptor: SegmentationDescriptor) -> Self {
        DescriptorBody::Segmentation(descriptor)
    }
}

impl From<TimeDescriptor> for DescriptorBody {
    fn from(descriptor: TimeDescriptor) -> Self {
        DescriptorBody::Time(descriptor)
    }
}

/// The header fields shared by every descriptor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DescriptorHeader<'a> {
    /// `splice_descriptor_tag`.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::view::u8_as_hex"))]
    pub tag: u8,
    /// `descriptor_length`: bytes following the length field.
    pub length: u8,
    /// Name derived from the tag.
    pub name: &'static str,
    /// 32-bit identifier as characters.
    pub identifier: &'a str,
}

/// A decoded splice descriptor: the common header plus exactly one body.
///
/// The tag is not stored separately; it is always the one of [`body`](Self::body),
/// so a descriptor can never carry fields of a kind other than its tag.
#[derive(Debug, Clone, PartialEq)]
pub struct SpliceDescriptor {
    length: u8,
    identifier: String,
    body: DescriptorBody,
}

impl SpliceDescriptor {
    /// Builds a descriptor, computing `descriptor_length` from the body.
    ///
    /// # Errors
    ///
    /// [`EncodingError::ValueTooLarge`](crate::encoding::EncodingError::ValueTooLarge)
    /// when the identifier and body do not fit in 255 bytes.
    pub fn new(
        identifier: impl Into<String>,
        body: impl Into<DescriptorBody>,
    ) -> EncodingResult<Self> {
        let mut descriptor = SpliceDescriptor {
            length: 0,
            identifier: identifier.into(),
            body: body.into(),
        };
        descriptor.refresh_length()?;
        Ok(descriptor)
    }

    /// Builds a descriptor with the `"CUEI"` identifier.
    pub fn cuei(body: impl Into<DescriptorBody>) -> EncodingResult<Self> {
        Self::new("CUEI", body)
    }

    /// Decodes the identifier and body of a descriptor whose tag and length
    /// have already been read.
    ///
    /// Unknown tags yield a header-only descriptor and consume nothing after
    /// the identifier; skipping the rest of the declared length is up to the
    /// caller (see [`parse_splice_descriptor`]).
    ///
    /// # Errors
    ///
    /// Any read failure aborts the decode; no partial descriptor is returned.
    pub fn decode(reader: &mut BitReader<'_>, tag: u8, length: u8) -> DecodeResult<Self> {
        let identifier = reader.read_ascii(32)?;
        let body = match tag {
            AVAIL_DESCRIPTOR_TAG => DescriptorBody::Avail(AvailDescriptor::decode(reader)?),
            DTMF_DESCRIPTOR_TAG => DescriptorBody::Dtmf(DtmfDescriptor::decode(reader)?),
            SEGMENTATION_DESCRIPTOR_TAG => {
                DescriptorBody::Segmentation(SegmentationDescriptor::decode(reader)?)
            }
            TIME_DESCRIPTOR_TAG => DescriptorBody::Time(TimeDescriptor::decode(reader)?),
            _ => {
                debug!("splice descriptor tag 0x{tag:02x} not recognized, keeping header only");
                DescriptorBody::Unknown(tag)
            }
        };
        trace!("decoded {} ({length} bytes)", body.name());

        Ok(SpliceDescriptor {
            length,
            identifier,
            body,
        })
    }

    /// Recomputes `descriptor_length` from the current body.
    ///
    /// Unknown descriptors keep their length, since their body is not held.
    /// When the body has outgrown the 8-bit length field the stored length is
    /// left unchanged and `ValueTooLarge` is returned.
    pub fn refresh_length(&mut self) -> EncodingResult<()> {
        if let DescriptorBody::Unknown(_) = self.body {
            return Ok(());
        }
        let length = 4 + self.body_size();
        ensure_fits("descriptor_length", length as u64, 8)?;
        self.length = length as u8;
        Ok(())
    }

    pub(crate) fn body_size(&self) -> usize {
        match &self.body {
            DescriptorBody::Avail(d) => d.encoded_size(),
            DescriptorBody::Dtmf(d) => d.encoded_size(),
            DescriptorBody::Segmentation(d) => d.encoded_size(),
            DescriptorBody::Time(d) => d.encoded_size(),
            DescriptorBody::Unknown(_) => usize::from(self.length).saturating_sub(4),
        }
    }

    /// `splice_descriptor_tag`.
    pub fn tag(&self) -> u8 {
        self.body.tag()
    }

    /// `descriptor_length` as decoded, or as computed by [`new`](Self::new).
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Name derived from the tag.
    pub fn name(&self) -> &'static str {
        self.body.name()
    }

    /// The 32-bit identifier as characters.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The common header fields.
    pub fn header(&self) -> DescriptorHeader<'_> {
        DescriptorHeader {
            tag: self.tag(),
            length: self.length,
            name: self.name(),
            identifier: &self.identifier,
        }
    }

    /// The tag-specific body.
    pub fn body(&self) -> &DescriptorBody {
        &self.body
    }

    /// Mutable access to the body.
    ///
    /// Replacing the body with another kind changes the tag along with it.
    /// The stored length is not updated; call
    /// [`refresh_length`](Self::refresh_length) after mutating.
    pub fn body_mut(&mut self) -> &mut DescriptorBody {
        &mut self.body
    }

    /// Consumes the descriptor, returning its body.
    pub fn into_body(self) -> DescriptorBody {
        self.body
    }

    /// The avail body, if this is an avail descriptor.
    pub fn avail(&self) -> Option<&AvailDescriptor> {
        match &self.body {
            DescriptorBody::Avail(d) => Some(d),
            _ => None,
        }
    }

    /// The DTMF body, if this is a DTMF descriptor.
    pub fn dtmf(&self) -> Option<&DtmfDescriptor> {
        match &self.body {
            DescriptorBody::Dtmf(d) => Some(d),
            _ => None,
        }
    }

    /// The segmentation body, if this is a segmentation descriptor.
    pub fn segmentation(&self) -> Option<&SegmentationDescriptor> {
        match &self.body {
            DescriptorBody::Segmentation(d) => Some(d),
            _ => None,
        }
    }

    /// The time body, if this is a time descriptor.
    pub fn time(&self) -> Option<&TimeDescriptor> {
        match &self.body {
            DescriptorBody::Time(d) => Some(d),
            _ => None,
        }
    }
}

/// Parses one descriptor (tag, length, identifier and body) from the start of
/// `buffer`, returning it together with the number of bytes it spans.
///
/// The body is decoded within its declared length. Bytes the decoder did not
/// consume, such as the body of an unknown tag, are skipped.
pub fn parse_splice_descriptor(buffer: &[u8]) -> DecodeResult<(SpliceDescriptor, usize)> {
    let mut reader = BitReader::new(buffer);
    let tag = reader.read_uint(8)? as u8;
    let length = reader.read_uint(8)? as u8;
    let declared_bits = usize::from(length) * 8;
    if declared_bits > reader.remaining() {
        return Err(DecodeError::TruncatedInput {
            offset: reader.offset(),
            requested: declared_bits,
            remaining: reader.remaining(),
        });
    }

    let end = 2 + usize::from(length);
    let mut body_reader = BitReader::new(&buffer[2..end]);
    let descriptor = SpliceDescriptor::decode(&mut body_reader, tag, length)
        .map_err(|err| shift_offset(err, 16))?;

    let unread = body_reader.remaining() / 8;
    if unread > 0 {
        match descriptor.body() {
            DescriptorBody::Unknown(_) => {
                trace!("skipping {unread} body bytes of descriptor tag 0x{tag:02x}")
            }
            body => warn!(
                "{} declared {length} bytes but only {} were decoded, skipping {unread}",
                body.name(),
                usize::from(length) - unread
            ),
        }
    }

    Ok((descriptor, end))
}

/// Parses consecutive descriptors until `buffer` is exhausted, as found in
/// the descriptor loop of a splice info section.
pub fn parse_descriptor_loop(buffer: &[u8]) -> DecodeResult<Vec<SpliceDescriptor>> {
    let mut descriptors = Vec::new();
    let mut position = 0;

    while position < buffer.len() {
        let (descriptor, consumed) = parse_splice_descriptor(&buffer[position..])
            .map_err(|err| shift_offset(err, position * 8))?;
        descriptors.push(descriptor);
        position += consumed;
    }

    Ok(descriptors)
}

fn shift_offset(err: DecodeError, bits: usize) -> DecodeError {
    match err {
        DecodeError::TruncatedInput {
            offset,
            requested,
            remaining,
        } => DecodeError::TruncatedInput {
            offset: offset + bits,
            requested,
            remaining,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_avail_descriptor() {
        let data = [b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35];
        let mut reader = BitReader::new(&data);
        let descriptor = SpliceDescriptor::decode(&mut reader, 0x00, 8).unwrap();

        assert_eq!(descriptor.tag(), 0x00);
        assert_eq!(descriptor.length(), 8);
        assert_eq!(descriptor.name(), "Avail Descriptor");
        assert_eq!(descriptor.identifier(), "CUEI");
        assert_eq!(
            descriptor.avail(),
            Some(&AvailDescriptor {
                provider_avail_id: 0x135
            })
        );
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn decode_unknown_tag_keeps_header() {
        let data = [b'C', b'U', b'E', b'I', 0xAA, 0xBB];
        let mut reader = BitReader::new(&data);
        let descriptor = SpliceDescriptor::decode(&mut reader, 0x7F, 6).unwrap();

        assert_eq!(
            descriptor.header(),
            DescriptorHeader {
                tag: 0x7F,
                length: 6,
                name: "Unknown Descriptor",
                identifier: "CUEI",
            }
        );
        assert_eq!(descriptor.body(), &DescriptorBody::Unknown(0x7F));
        assert!(descriptor.avail().is_none());
        assert!(descriptor.dtmf().is_none());
        assert!(descriptor.segmentation().is_none());
        assert!(descriptor.time().is_none());
        // only the identifier is consumed
        assert_eq!(reader.offset(), 32);
    }

    #[test]
    fn decode_truncated_identifier() {
        let data = [b'C', b'U'];
        let mut reader = BitReader::new(&data);

        assert_eq!(
            SpliceDescriptor::decode(&mut reader, 0x00, 8),
            Err(DecodeError::TruncatedInput {
                offset: 0,
                requested: 32,
                remaining: 16,
            })
        );
    }

    #[test]
    fn new_computes_length() {
        let descriptor = SpliceDescriptor::cuei(AvailDescriptor {
            provider_avail_id: 1,
        })
        .unwrap();
        assert_eq!(descriptor.length(), 8);

        let descriptor = SpliceDescriptor::cuei(TimeDescriptor::default()).unwrap();
        assert_eq!(descriptor.length(), 16);
    }

    #[test]
    fn replacing_body_changes_tag() {
        let mut descriptor = SpliceDescriptor::cuei(AvailDescriptor::default()).unwrap();
        assert_eq!(descriptor.tag(), AVAIL_DESCRIPTOR_TAG);

        *descriptor.body_mut() = DescriptorBody::Time(TimeDescriptor::default());
        assert_eq!(descriptor.tag(), TIME_DESCRIPTOR_TAG);
        assert_eq!(descriptor.name(), "Time Descriptor");
        // stale until refreshed
        assert_eq!(descriptor.length(), 8);

        descriptor.refresh_length().unwrap();
        assert_eq!(descriptor.length(), 16);
    }

    #[test]
    fn parse_descriptor_skips_unknown_body() {
        let data = [
            0x7F, 0x06, b'C', b'U', b'E', b'I', 0xAA, 0xBB, // unknown
            0x00, 0x08, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35, // avail
        ];
        let (descriptor, consumed) = parse_splice_descriptor(&data).unwrap();
        assert_eq!(descriptor.tag(), 0x7F);
        assert_eq!(consumed, 8);

        let descriptors = parse_descriptor_loop(&data).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].avail().unwrap().provider_avail_id, 0x135);
    }

    #[test]
    fn parse_descriptor_declared_length_exceeds_buffer() {
        let data = [0x00, 0x08, b'C', b'U', b'E', b'I'];

        assert_eq!(
            parse_splice_descriptor(&data),
            Err(DecodeError::TruncatedInput {
                offset: 16,
                requested: 64,
                remaining: 32,
            })
        );
    }

    #[test]
    fn parse_descriptor_body_overruns_declared_length() {
        // avail descriptor declaring only the identifier
        let data = [0x00, 0x04, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35];

        assert_eq!(
            parse_splice_descriptor(&data),
            Err(DecodeError::TruncatedInput {
                offset: 48,
                requested: 32,
                remaining: 0,
            })
        );
    }

    #[test]
    fn parse_loop_reports_absolute_offsets() {
        let data = [
            0x00, 0x08, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35, // avail
            0x03, 0x04, b'C', b'U', b'E', b'I', // time descriptor without its body
        ];

        assert_eq!(
            parse_descriptor_loop(&data),
            Err(DecodeError::TruncatedInput {
                offset: (10 + 6) * 8,
                requested: 48,
                remaining: 0,
            })
        );
    }
}
