//! Segmentation UPID (Unique Program Identifier) payloads.
//!
//! The segmentation descriptor only knows a UPID's type and byte length; how
//! the payload is laid out depends on the type. Types that are defined as
//! character strings decode to [`Upid::Text`], small integer identifiers to
//! [`Upid::Hex`], and MPU/MID get structured variants. Everything else is
//! kept as raw bytes so it can be written back unchanged.

use crate::bit_reader::BitReader;
use crate::error::{DecodeError, DecodeResult};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A decoded `segmentation_upid()` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Upid {
    /// Character UPIDs: user defined, ISCI, Ad-ID, TID, ADI, ADS information, URI, SCR.
    Text(String),
    /// Integer UPIDs of at most 8 bytes (Airing ID, deprecated ISAN), as `0x`-prefixed hex.
    Hex(String),
    /// Managed private UPID (type 0x0C).
    Mpu {
        /// 32-bit registered format identifier.
        format_identifier: String,
        /// Private data following the identifier.
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::view::as_hex"))]
        private_data: Vec<u8>,
    },
    /// Multiple UPIDs (type 0x0D).
    Mid(Vec<MidUpid>),
    /// Any other type, kept verbatim.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::view::as_hex"))]
    Bytes(Vec<u8>),
}

/// One entry of a MID UPID.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MidUpid {
    /// `segmentation_upid_type` of the entry.
    pub upid_type: u8,
    /// The entry payload.
    pub upid: Upid,
}

impl Upid {
    /// Decodes `upid_length` bytes of a UPID of type `upid_type`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedInput`] if the buffer ends early and
    /// [`DecodeError::InvalidUpid`] if an MPU or MID payload is malformed.
    pub fn decode(reader: &mut BitReader<'_>, upid_type: u8, upid_length: u8) -> DecodeResult<Self> {
        let length = usize::from(upid_length);
        let bits = length * 8;

        match upid_type {
            0x01 | 0x02 | 0x03 | 0x07 | 0x09 | 0x0E | 0x0F | 0x11 => {
                Ok(Upid::Text(reader.read_ascii(bits)?))
            }
            0x05 | 0x08 if (1..=8).contains(&length) => Ok(Upid::Hex(reader.read_hex(bits)?)),
            0x0C => {
                if length < 4 {
                    return Err(DecodeError::InvalidUpid {
                        upid_type,
                        reason: format!("{length} bytes cannot hold a format identifier"),
                    });
                }
                let format_identifier = reader.read_ascii(32)?;
                let private_data = reader.read_bytes(length - 4)?;
                Ok(Upid::Mpu {
                    format_identifier,
                    private_data,
                })
            }
            0x0D => Self::decode_mid(reader, length),
            _ => Ok(Upid::Bytes(reader.read_bytes(length)?)),
        }
    }

    fn decode_mid(reader: &mut BitReader<'_>, length: usize) -> DecodeResult<Self> {
        let end = reader.offset() + length * 8;
        let mut upids = Vec::new();

        while reader.offset() < end {
            if end - reader.offset() < 16 {
                return Err(DecodeError::InvalidUpid {
                    upid_type: 0x0D,
                    reason: "trailing bytes too short for a type and length".to_string(),
                });
            }
            let upid_type = reader.read_uint(8)? as u8;
            let upid_length = reader.read_uint(8)? as u8;
            if reader.offset() + usize::from(upid_length) * 8 > end {
                return Err(DecodeError::InvalidUpid {
                    upid_type: 0x0D,
                    reason: format!(
                        "entry of type 0x{upid_type:02x} with {upid_length} bytes overruns the MID"
                    ),
                });
            }
            let upid = Upid::decode(reader, upid_type, upid_length)?;
            upids.push(MidUpid { upid_type, upid });
        }

        Ok(Upid::Mid(upids))
    }

    /// Number of bytes this UPID occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Upid::Text(text) => text.chars().count(),
            Upid::Hex(hex) => hex_digits(hex).len().div_ceil(2),
            Upid::Mpu { private_data, .. } => 4 + private_data.len(),
            Upid::Mid(upids) => upids.iter().map(|m| 2 + m.upid.encoded_len()).sum(),
            Upid::Bytes(bytes) => bytes.len(),
        }
    }
}

pub(crate) fn hex_digits(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Returns a human-readable name for a `segmentation_upid_type`.
pub fn upid_type_name(upid_type: u8) -> &'static str {
    match upid_type {
        0x00 => "Not Used",
        0x01 => "User Defined (Deprecated)",
        0x02 => "ISCI",
        0x03 => "Ad-ID",
        0x04 => "UMID",
        0x05 => "ISAN (Deprecated)",
        0x06 => "ISAN",
        0x07 => "TID",
        0x08 => "Airing ID",
        0x09 => "ADI",
        0x0A => "EIDR",
        0x0B => "ATSC Content Identifier",
        0x0C => "MPU",
        0x0D => "MID",
        0x0E => "ADS Information",
        0x0F => "URI",
        0x10 => "UUID",
        0x11 => "SCR",
        _ => "Reserved",
    }
}
