use crate::bit_reader::BitReader;
use crate::error::DecodeResult;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Avail descriptor (tag 0x00): identifies an avail within a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AvailDescriptor {
    pub provider_avail_id: u32,
}

impl AvailDescriptor {
    pub(crate) fn decode(reader: &mut BitReader<'_>) -> DecodeResult<Self> {
        Ok(AvailDescriptor {
            provider_avail_id: reader.read_uint(32)? as u32,
        })
    }
}
