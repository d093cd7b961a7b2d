//! Segmentation descriptor (tag 0x02).
//!
//! The body is a conditional grammar: a cancel indicator short-circuits
//! everything after the event ID, `delivery_not_restricted_flag` decides
//! whether the restriction flags are present, `segmentation_duration_flag`
//! gates the duration, and the segmentation type ID decides whether the two
//! sub-segment fields follow. Fields that were not on the wire are `None`.

use crate::bit_reader::BitReader;
use crate::error::DecodeResult;
use crate::tables::{device_restriction_label, has_sub_segments, segmentation_type_label};
use crate::upid::Upid;
use log::debug;

/// A decoded `segmentation_descriptor()` body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentationDescriptor {
    /// 32-bit event ID as `0x`-prefixed lowercase hex.
    pub segmentation_event_id: String,
    pub segmentation_event_cancel_indicator: bool,
    pub segmentation_event_id_compliance_indicator: bool,

    pub program_segmentation_flag: bool,
    pub segmentation_duration_flag: bool,
    pub delivery_not_restricted_flag: bool,

    /// Present only when delivery is restricted.
    pub web_delivery_allowed_flag: Option<bool>,
    pub no_regional_blackout_flag: Option<bool>,
    pub archive_allowed_flag: Option<bool>,
    /// Device restriction label; empty when the code has no label.
    pub device_restrictions: Option<String>,

    /// Duration in seconds, present when `segmentation_duration_flag` is set.
    pub segmentation_duration: Option<f64>,

    pub segmentation_upid_type: u8,
    pub segmentation_upid_length: u8,
    /// `None` when `segmentation_upid_length` is zero.
    pub segmentation_upid: Option<Upid>,

    pub segmentation_type_id: u8,
    pub segment_num: u8,
    pub segments_expected: u8,
    /// Present only for segmentation types that carry sub-segments.
    pub sub_segment_num: Option<u8>,
    pub sub_segments_expected: Option<u8>,
}

impl SegmentationDescriptor {
    pub(crate) fn decode(reader: &mut BitReader<'_>) -> DecodeResult<Self> {
        let mut descriptor = SegmentationDescriptor {
            segmentation_event_id: reader.read_hex(32)?,
            ..Default::default()
        };
        descriptor.segmentation_event_cancel_indicator = reader.read_flag()?;
        descriptor.segmentation_event_id_compliance_indicator = reader.read_flag()?;
        reader.advance(6)?;

        if !descriptor.segmentation_event_cancel_indicator {
            descriptor.decode_flags(reader)?;
            descriptor.decode_segmentation(reader)?;
        }

        Ok(descriptor)
    }

    fn decode_flags(&mut self, reader: &mut BitReader<'_>) -> DecodeResult<()> {
        self.program_segmentation_flag = reader.read_flag()?;
        self.segmentation_duration_flag = reader.read_flag()?;
        self.delivery_not_restricted_flag = reader.read_flag()?;

        if self.delivery_not_restricted_flag {
            reader.advance(5)?;
            return Ok(());
        }

        self.web_delivery_allowed_flag = Some(reader.read_flag()?);
        self.no_regional_blackout_flag = Some(reader.read_flag()?);
        self.archive_allowed_flag = Some(reader.read_flag()?);
        let code = reader.read_uint(2)? as u8;
        let label = device_restriction_label(code).unwrap_or_default();
        self.device_restrictions = Some(label.to_string());

        Ok(())
    }

    fn decode_segmentation(&mut self, reader: &mut BitReader<'_>) -> DecodeResult<()> {
        if self.segmentation_duration_flag {
            self.segmentation_duration = Some(reader.read_ninety_k(40)?);
        }

        self.segmentation_upid_type = reader.read_uint(8)? as u8;
        self.segmentation_upid_length = reader.read_uint(8)? as u8;
        if self.segmentation_upid_length > 0 {
            self.segmentation_upid = Some(Upid::decode(
                reader,
                self.segmentation_upid_type,
                self.segmentation_upid_length,
            )?);
        }

        self.segmentation_type_id = reader.read_uint(8)? as u8;
        if segmentation_type_label(self.segmentation_type_id).is_none() {
            debug!(
                "segmentation type id 0x{:02x} has no label",
                self.segmentation_type_id
            );
        }
        self.segment_num = reader.read_uint(8)? as u8;
        self.segments_expected = reader.read_uint(8)? as u8;

        if has_sub_segments(self.segmentation_type_id) {
            self.sub_segment_num = Some(reader.read_uint(8)? as u8);
            self.sub_segments_expected = Some(reader.read_uint(8)? as u8);
        }

        Ok(())
    }

    /// Label of the segmentation type, or an empty string when the ID is not
    /// in the table or the event was cancelled.
    pub fn segmentation_message(&self) -> &'static str {
        if self.segmentation_event_cancel_indicator {
            return "";
        }
        segmentation_type_label(self.segmentation_type_id).unwrap_or_default()
    }
}
