use crate::bit_reader::BitReader;
use crate::error::DecodeResult;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Time descriptor (tag 0x03): a TAI timestamp and the UTC offset in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeDescriptor {
    /// 48-bit TAI seconds.
    pub tai_seconds: u64,
    pub tai_ns: u32,
    pub utc_offset: u16,
}

impl TimeDescriptor {
    pub(crate) fn decode(reader: &mut BitReader<'_>) -> DecodeResult<Self> {
        Ok(TimeDescriptor {
            tai_seconds: reader.read_uint(48)?,
            tai_ns: reader.read_uint(32)? as u32,
            utc_offset: reader.read_uint(16)? as u16,
        })
    }
}
