//! Trait definitions for encodable types.

use super::error::EncodingResult;
use super::writer::BitWriter;

/// Types that can be written in their binary wire format.
pub trait Encodable {
    /// Writes the structure to `writer`.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()>;

    /// Number of bytes `encode` writes.
    ///
    /// Used to pre-allocate buffers and to compute length fields.
    fn encoded_size(&self) -> usize;

    /// Encodes into a new byte vector.
    fn encode_to_vec(&self) -> EncodingResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_size());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }

    /// Encodes and renders the bytes as standard base64.
    #[cfg(feature = "base64")]
    fn encode_base64(&self) -> EncodingResult<String> {
        let bytes = self.encode_to_vec()?;
        Ok(data_encoding::BASE64.encode(&bytes))
    }
}
