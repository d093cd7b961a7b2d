//! Encoding for segmentation UPID payloads.

use crate::encoding::{BitWriter, EncodingError, EncodingResult};
use crate::upid::{Upid, hex_digits};

impl Upid {
    /// Writes the UPID payload (without its type and length bytes).
    ///
    /// `upid_type` is the type the payload is announced with; it is only used
    /// to put errors in context.
    pub fn encode(&self, writer: &mut BitWriter, upid_type: u8) -> EncodingResult<()> {
        match self {
            Upid::Text(text) => writer.add_ascii(text).map_err(|_| invalid(upid_type, text)),
            Upid::Hex(hex) => {
                let bits = self.encoded_len() * 8;
                if bits == 0 || bits > 64 || hex_digits(hex).len() % 2 != 0 {
                    return Err(invalid(upid_type, hex));
                }
                writer.add_hex(hex, bits).map_err(|_| invalid(upid_type, hex))
            }
            Upid::Mpu {
                format_identifier,
                private_data,
            } => {
                if format_identifier.chars().count() != 4 {
                    return Err(invalid(upid_type, format_identifier));
                }
                writer
                    .add_ascii(format_identifier)
                    .map_err(|_| invalid(upid_type, format_identifier))?;
                writer.add_bytes(private_data)
            }
            Upid::Mid(upids) => {
                for entry in upids {
                    let length = entry.upid.encoded_len();
                    let length = u8::try_from(length).map_err(|_| EncodingError::ValueTooLarge {
                        field: "segmentation_upid_length",
                        max_value: u64::from(u8::MAX),
                        actual_value: length as u64,
                    })?;
                    writer.add_uint(u64::from(entry.upid_type), 8)?;
                    writer.add_uint(u64::from(length), 8)?;
                    entry.upid.encode(writer, entry.upid_type)?;
                }
                Ok(())
            }
            Upid::Bytes(bytes) => writer.add_bytes(bytes),
        }
    }
}

fn invalid(upid_type: u8, value: &str) -> EncodingError {
    EncodingError::InvalidFieldValue {
        field: "segmentation_upid",
        value: format!("type 0x{upid_type:02x}: {value:?}"),
    }
}
