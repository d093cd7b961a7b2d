//! Encoding implementations for splice descriptors.
//!
//! The variant structs encode only their body; [`SpliceDescriptor`] adds the
//! tag, the computed length and the identifier in front of it.

use crate::descriptors::*;
use crate::encoding::writer::ensure_fits;
use crate::encoding::{BitWriter, Encodable, EncodingError, EncodingResult};
use crate::tables::{device_restriction_code, has_sub_segments};
use crate::upid::Upid;

impl SpliceDescriptor {
    /// Writes the identifier and body, without tag and length.
    pub fn encode_body(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        if let DescriptorBody::Unknown(tag) = self.body() {
            return Err(EncodingError::UnsupportedDescriptorTag(*tag));
        }

        // identifier (32 bits)
        if self.identifier().chars().count() != 4 {
            return Err(EncodingError::InvalidFieldValue {
                field: "identifier",
                value: self.identifier().to_string(),
            });
        }
        writer
            .add_ascii(self.identifier())
            .map_err(|e| e.for_field("identifier"))?;

        match self.body() {
            DescriptorBody::Avail(desc) => desc.encode(writer),
            DescriptorBody::Dtmf(desc) => desc.encode(writer),
            DescriptorBody::Segmentation(desc) => desc.encode(writer),
            DescriptorBody::Time(desc) => desc.encode(writer),
            DescriptorBody::Unknown(tag) => Err(EncodingError::UnsupportedDescriptorTag(*tag)),
        }
    }
}

impl Encodable for SpliceDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        if let DescriptorBody::Unknown(tag) = self.body() {
            return Err(EncodingError::UnsupportedDescriptorTag(*tag));
        }

        // descriptor_length counts the identifier and the body
        let length = 4 + self.body_size();
        ensure_fits("descriptor_length", length as u64, 8)?;

        // splice_descriptor_tag (8 bits)
        writer.add_uint(u64::from(self.tag()), 8)?;

        // descriptor_length (8 bits)
        writer.add_uint(length as u64, 8)?;

        self.encode_body(writer)
    }

    fn encoded_size(&self) -> usize {
        2 + 4 + self.body_size()
    }
}

impl Encodable for AvailDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.add_uint(u64::from(self.provider_avail_id), 32)
    }

    fn encoded_size(&self) -> usize {
        4
    }
}

impl Encodable for DtmfDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        ensure_fits("dtmf_count", u64::from(self.dtmf_count), 3)?;
        if self.dtmf_chars.chars().count() != usize::from(self.dtmf_count) {
            return Err(EncodingError::InvalidFieldValue {
                field: "dtmf_chars",
                value: format!("{:?} (dtmf_count is {})", self.dtmf_chars, self.dtmf_count),
            });
        }

        // preroll (8 bits)
        writer.add_uint(u64::from(self.preroll), 8)?;

        // dtmf_count (3 bits), reserved (5 bits)
        writer.add_uint(u64::from(self.dtmf_count), 3)?;
        writer.reserve(5)?;

        // DTMF_char (8 bits each)
        writer
            .add_ascii(&self.dtmf_chars)
            .map_err(|e| e.for_field("dtmf_chars"))
    }

    fn encoded_size(&self) -> usize {
        2 + usize::from(self.dtmf_count)
    }
}

impl Encodable for SegmentationDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        // segmentation_event_id (32 bits)
        writer
            .add_hex(&self.segmentation_event_id, 32)
            .map_err(|e| e.for_field("segmentation_event_id"))?;

        // segmentation_event_cancel_indicator (1 bit)
        writer.add_flag(self.segmentation_event_cancel_indicator)?;

        // segmentation_event_id_compliance_indicator (1 bit), reserved (6 bits)
        writer.add_flag(self.segmentation_event_id_compliance_indicator)?;
        writer.reserve(6)?;

        if self.segmentation_event_cancel_indicator {
            return Ok(());
        }

        self.encode_flags(writer)?;
        self.encode_segmentation(writer)
    }

    fn encoded_size(&self) -> usize {
        // event id + cancel/compliance byte
        let mut size = 5;
        if !self.segmentation_event_cancel_indicator {
            // flags, upid type/length, type id, segment_num, segments_expected
            size += 1 + 2 + 3;
            if self.segmentation_duration_flag {
                size += 5;
            }
            size += self.segmentation_upid.as_ref().map_or(0, Upid::encoded_len);
            if has_sub_segments(self.segmentation_type_id) {
                size += 2;
            }
        }
        size
    }
}

impl SegmentationDescriptor {
    fn encode_flags(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.add_flag(self.program_segmentation_flag)?;
        writer.add_flag(self.segmentation_duration_flag)?;
        writer.add_flag(self.delivery_not_restricted_flag)?;

        if self.delivery_not_restricted_flag {
            // reserved (5 bits)
            return writer.reserve(5);
        }

        let web_delivery_allowed =
            self.web_delivery_allowed_flag
                .ok_or(EncodingError::MissingRequiredField {
                    field: "web_delivery_allowed_flag",
                })?;
        let no_regional_blackout =
            self.no_regional_blackout_flag
                .ok_or(EncodingError::MissingRequiredField {
                    field: "no_regional_blackout_flag",
                })?;
        let archive_allowed =
            self.archive_allowed_flag
                .ok_or(EncodingError::MissingRequiredField {
                    field: "archive_allowed_flag",
                })?;
        writer.add_flag(web_delivery_allowed)?;
        writer.add_flag(no_regional_blackout)?;
        writer.add_flag(archive_allowed)?;

        // device_restrictions (2 bits), looked up from its label
        let label = self
            .device_restrictions
            .as_deref()
            .ok_or(EncodingError::MissingRequiredField {
                field: "device_restrictions",
            })?;
        let code =
            device_restriction_code(label).ok_or_else(|| EncodingError::UnresolvedLabel {
                field: "device_restrictions",
                label: label.to_string(),
            })?;
        writer.add_uint(u64::from(code), 2)
    }

    fn encode_segmentation(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        // segmentation_duration (40 bits)
        if self.segmentation_duration_flag {
            let duration =
                self.segmentation_duration
                    .ok_or(EncodingError::MissingRequiredField {
                        field: "segmentation_duration",
                    })?;
            writer
                .add_ninety_k(duration, 40)
                .map_err(|e| e.for_field("segmentation_duration"))?;
        }

        // segmentation_upid_type (8 bits)
        writer.add_uint(u64::from(self.segmentation_upid_type), 8)?;

        // segmentation_upid_length (8 bits), must describe the payload
        let payload_len = self
            .segmentation_upid
            .as_ref()
            .map_or(0, Upid::encoded_len);
        if payload_len != usize::from(self.segmentation_upid_length) {
            return Err(EncodingError::InvalidFieldValue {
                field: "segmentation_upid_length",
                value: format!(
                    "{} (payload is {payload_len} bytes)",
                    self.segmentation_upid_length
                ),
            });
        }
        writer.add_uint(u64::from(self.segmentation_upid_length), 8)?;

        // segmentation_upid (variable length)
        if let Some(upid) = &self.segmentation_upid {
            upid.encode(writer, self.segmentation_upid_type)?;
        }

        // segmentation_type_id, segment_num, segments_expected (8 bits each)
        writer.add_uint(u64::from(self.segmentation_type_id), 8)?;
        writer.add_uint(u64::from(self.segment_num), 8)?;
        writer.add_uint(u64::from(self.segments_expected), 8)?;

        if has_sub_segments(self.segmentation_type_id) {
            let sub_segment_num = self
                .sub_segment_num
                .ok_or(EncodingError::MissingRequiredField {
                    field: "sub_segment_num",
                })?;
            let sub_segments_expected =
                self.sub_segments_expected
                    .ok_or(EncodingError::MissingRequiredField {
                        field: "sub_segments_expected",
                    })?;
            writer.add_uint(u64::from(sub_segment_num), 8)?;
            writer.add_uint(u64::from(sub_segments_expected), 8)?;
        }

        Ok(())
    }
}

impl Encodable for TimeDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        // TAI_seconds (48 bits)
        writer
            .add_uint(self.tai_seconds, 48)
            .map_err(|e| e.for_field("tai_seconds"))?;

        // TAI_ns (32 bits)
        writer.add_uint(u64::from(self.tai_ns), 32)?;

        // UTC_offset (16 bits)
        writer.add_uint(u64::from(self.utc_offset), 16)
    }

    fn encoded_size(&self) -> usize {
        12
    }
}
