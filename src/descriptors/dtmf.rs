use crate::bit_reader::BitReader;
use crate::error::DecodeResult;

#[cfg(feature = "serde")]
use serde::Serialize;

/// DTMF descriptor (tag 0x01): the tones a receiver should emit ahead of a
/// splice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DtmfDescriptor {
    /// Tenths of a second between the tones and the splice point.
    pub preroll: u8,
    /// Number of DTMF characters, 0 to 7.
    pub dtmf_count: u8,
    pub dtmf_chars: String,
}

impl DtmfDescriptor {
    pub(crate) fn decode(reader: &mut BitReader<'_>) -> DecodeResult<Self> {
        let preroll = reader.read_uint(8)? as u8;
        let dtmf_count = reader.read_uint(3)? as u8;
        reader.advance(5)?;
        let dtmf_chars = reader.read_ascii(usize::from(dtmf_count) * 8)?;

        Ok(DtmfDescriptor {
            preroll,
            dtmf_count,
            dtmf_chars,
        })
    }
}
