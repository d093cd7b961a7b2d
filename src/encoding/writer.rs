//! Bit-level writer for encoding binary data.

use super::error::{EncodingError, EncodingResult};
use crate::secs_to_ticks;

/// A writer that can write individual bits to a byte buffer.
///
/// This is the encoding counterpart to [`BitReader`](crate::BitReader): every
/// `read_*` method has an `add_*` twin that emits the same bits.
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// The output buffer.
    buffer: Vec<u8>,
    /// Current bit position within the current byte (0-7).
    bit_position: u8,
    /// Current byte being written.
    current_byte: u8,
}

impl BitWriter {
    /// Creates a new `BitWriter` with an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new `BitWriter` with a pre-allocated buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            bit_position: 0,
            current_byte: 0,
        }
    }

    /// Writes `value` using `bits` bits (1-64), MSB first.
    ///
    /// # Errors
    /// [`EncodingError::InvalidFieldValue`] if `bits` is out of range and
    /// [`EncodingError::ValueTooLarge`] if `value` needs more than `bits` bits.
    pub fn add_uint(&mut self, value: u64, bits: usize) -> EncodingResult<()> {
        if bits == 0 || bits > 64 {
            return Err(EncodingError::InvalidFieldValue {
                field: "bits",
                value: bits.to_string(),
            });
        }
        ensure_fits("uint", value, bits)?;

        let mut remaining_bits = bits;
        while remaining_bits > 0 {
            let available = usize::from(8 - self.bit_position);
            let bits_to_write = remaining_bits.min(available);
            let shift_amount = remaining_bits - bits_to_write;
            let mask = (1u16 << bits_to_write) - 1;
            let bits_value = ((value >> shift_amount) as u16 & mask) as u8;

            self.current_byte |= bits_value << (available - bits_to_write);
            self.bit_position += bits_to_write as u8;

            if self.bit_position == 8 {
                self.buffer.push(self.current_byte);
                self.current_byte = 0;
                self.bit_position = 0;
            }

            remaining_bits -= bits_to_write;
        }

        Ok(())
    }

    /// Writes a single bit.
    pub fn add_flag(&mut self, flag: bool) -> EncodingResult<()> {
        self.add_uint(u64::from(flag), 1)
    }

    /// Parses a hex string (with or without `0x`) and writes it in `bits` bits.
    pub fn add_hex(&mut self, hex: &str, bits: usize) -> EncodingResult<()> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        let value = u64::from_str_radix(digits, 16).map_err(|_| EncodingError::InvalidFieldValue {
            field: "hex",
            value: hex.to_string(),
        })?;
        self.add_uint(value, bits)
    }

    /// Writes each character of `text` as one byte.
    ///
    /// The inverse of [`BitReader::read_ascii`](crate::BitReader::read_ascii):
    /// only characters in `U+0000..=U+00FF` can be written.
    pub fn add_ascii(&mut self, text: &str) -> EncodingResult<()> {
        for c in text.chars() {
            let byte = u8::try_from(c).map_err(|_| EncodingError::InvalidFieldValue {
                field: "ascii",
                value: text.to_string(),
            })?;
            self.add_uint(u64::from(byte), 8)?;
        }
        Ok(())
    }

    /// Writes a duration in seconds as 90kHz clock ticks.
    pub fn add_ninety_k(&mut self, secs: f64, bits: usize) -> EncodingResult<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(EncodingError::InvalidFieldValue {
                field: "ninety_k",
                value: secs.to_string(),
            });
        }
        self.add_uint(secs_to_ticks(secs), bits)
    }

    /// Writes a complete byte array.
    pub fn add_bytes(&mut self, bytes: &[u8]) -> EncodingResult<()> {
        for &byte in bytes {
            self.add_uint(u64::from(byte), 8)?;
        }
        Ok(())
    }

    /// Emits `bits` zero bits for a reserved region.
    pub fn reserve(&mut self, bits: usize) -> EncodingResult<()> {
        let mut remaining = bits;
        while remaining > 0 {
            let chunk = remaining.min(64);
            self.add_uint(0, chunk)?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Aligns to the next byte boundary by padding with zeros if necessary.
    pub fn align_to_byte(&mut self) -> EncodingResult<()> {
        if self.bit_position > 0 {
            self.reserve(usize::from(8 - self.bit_position))?;
        }
        Ok(())
    }

    /// Finishes writing and returns the complete buffer.
    ///
    /// This will pad the last byte with zeros if necessary.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_position > 0 {
            self.buffer.push(self.current_byte);
        }
        self.buffer
    }

    /// Returns the current size of the buffer in bytes, counting a
    /// partially written byte.
    pub fn len(&self) -> usize {
        self.buffer.len() + usize::from(self.bit_position > 0)
    }

    /// Returns true if no bits have been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.bit_position == 0
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + usize::from(self.bit_position)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that `value` is representable in `bits` bits.
pub(crate) fn ensure_fits(field: &'static str, value: u64, bits: usize) -> EncodingResult<()> {
    if bits < 64 {
        let max_value = (1u64 << bits) - 1;
        if value > max_value {
            return Err(EncodingError::ValueTooLarge {
                field,
                max_value,
                actual_value: value,
            });
        }
    }
    Ok(())
}
