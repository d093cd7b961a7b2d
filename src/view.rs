//! Serde serialization support for splice descriptors.
//!
//! A descriptor renders as one flat object: the header fields (`tag`,
//! `length`, `name`, `identifier`) followed by the fields of its kind.
//! Segmentation descriptors leave out every field that was not on the wire.

use crate::descriptors::{
    AvailDescriptor, DescriptorBody, DescriptorHeader, DtmfDescriptor, SegmentationDescriptor,
    SpliceDescriptor, TimeDescriptor,
};
use crate::upid::upid_type_name;
use data_encoding::HEXLOWER;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Serializes bytes as a `0x`-prefixed lowercase hex string.
pub(crate) fn as_hex<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", HEXLOWER.encode(bytes.as_ref())))
}

pub(crate) fn u8_as_hex<S>(value: &u8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{value:02x}"))
}

#[derive(Serialize)]
#[serde(untagged)]
enum BodyView<'a> {
    Avail(&'a AvailDescriptor),
    Dtmf(&'a DtmfDescriptor),
    Segmentation(&'a SegmentationDescriptor),
    Time(&'a TimeDescriptor),
}

#[derive(Serialize)]
struct DescriptorView<'a> {
    #[serde(flatten)]
    header: DescriptorHeader<'a>,
    #[serde(flatten)]
    body: Option<BodyView<'a>>,
}

impl Serialize for SpliceDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let body = match self.body() {
            DescriptorBody::Avail(d) => Some(BodyView::Avail(d)),
            DescriptorBody::Dtmf(d) => Some(BodyView::Dtmf(d)),
            DescriptorBody::Segmentation(d) => Some(BodyView::Segmentation(d)),
            DescriptorBody::Time(d) => Some(BodyView::Time(d)),
            DescriptorBody::Unknown(_) => None,
        };

        DescriptorView {
            header: self.header(),
            body,
        }
        .serialize(serializer)
    }
}

impl SpliceDescriptor {
    /// Renders the descriptor as a JSON value.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl SegmentationDescriptor {
    /// Number of fields [`Serialize`] emits for this descriptor.
    fn field_count(&self) -> usize {
        let mut num_fields = 3;
        if self.segmentation_event_cancel_indicator {
            return num_fields;
        }

        num_fields += 10;
        let optional = [
            self.web_delivery_allowed_flag.is_some(),
            self.no_regional_blackout_flag.is_some(),
            self.archive_allowed_flag.is_some(),
            self.device_restrictions.is_some(),
            self.segmentation_duration.is_some(),
            self.segmentation_upid.is_some(),
            self.sub_segment_num.is_some(),
            self.sub_segments_expected.is_some(),
        ];
        num_fields + optional.iter().filter(|present| **present).count()
    }
}

impl Serialize for SegmentationDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let cancelled = self.segmentation_event_cancel_indicator;

        let mut state =
            serializer.serialize_struct("SegmentationDescriptor", self.field_count())?;
        state.serialize_field("segmentation_event_id", &self.segmentation_event_id)?;
        state.serialize_field("segmentation_event_cancel_indicator", &cancelled)?;
        state.serialize_field(
            "segmentation_event_id_compliance_indicator",
            &self.segmentation_event_id_compliance_indicator,
        )?;
        if cancelled {
            return state.end();
        }

        state.serialize_field("program_segmentation_flag", &self.program_segmentation_flag)?;
        state.serialize_field(
            "segmentation_duration_flag",
            &self.segmentation_duration_flag,
        )?;
        state.serialize_field(
            "delivery_not_restricted_flag",
            &self.delivery_not_restricted_flag,
        )?;
        if let Some(flag) = self.web_delivery_allowed_flag {
            state.serialize_field("web_delivery_allowed_flag", &flag)?;
        }
        if let Some(flag) = self.no_regional_blackout_flag {
            state.serialize_field("no_regional_blackout_flag", &flag)?;
        }
        if let Some(flag) = self.archive_allowed_flag {
            state.serialize_field("archive_allowed_flag", &flag)?;
        }
        if let Some(restrictions) = &self.device_restrictions {
            state.serialize_field("device_restrictions", restrictions)?;
        }
        if let Some(duration) = self.segmentation_duration {
            state.serialize_field("segmentation_duration", &duration)?;
        }

        state.serialize_field(
            "segmentation_upid_type",
            &format!("0x{:02x}", self.segmentation_upid_type),
        )?;
        state.serialize_field(
            "segmentation_upid_type_name",
            upid_type_name(self.segmentation_upid_type),
        )?;
        state.serialize_field("segmentation_upid_length", &self.segmentation_upid_length)?;
        if let Some(upid) = &self.segmentation_upid {
            state.serialize_field("segmentation_upid", upid)?;
        }

        state.serialize_field("segmentation_type_id", &self.segmentation_type_id)?;
        state.serialize_field("segmentation_message", self.segmentation_message())?;
        state.serialize_field("segment_num", &self.segment_num)?;
        state.serialize_field("segments_expected", &self.segments_expected)?;
        if let Some(num) = self.sub_segment_num {
            state.serialize_field("sub_segment_num", &num)?;
        }
        if let Some(expected) = self.sub_segments_expected {
            state.serialize_field("sub_segments_expected", &expected)?;
        }

        state.end()
    }
}
