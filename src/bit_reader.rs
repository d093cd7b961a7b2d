//! Bit-level reading utilities for decoding splice descriptors.
//!
//! Descriptor fields are packed MSB first and are frequently narrower than a
//! byte, so decoding walks the buffer with a bit offset rather than a byte
//! index.

use crate::error::{DecodeError, DecodeResult};
use crate::ticks_to_secs;

/// A cursor that extracts values at the bit level from a byte buffer.
///
/// The cursor starts at bit offset 0 and only ever moves forward. A failed
/// read leaves the offset where it was.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` positioned at the first bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        BitReader { buffer, offset: 0 }
    }

    /// Reads `num_bits` (1..=64) as an unsigned integer, MSB first.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidWidth`] for a width outside 1..=64 and
    /// [`DecodeError::TruncatedInput`] if fewer than `num_bits` remain.
    pub fn read_uint(&mut self, num_bits: usize) -> DecodeResult<u64> {
        if num_bits == 0 || num_bits > 64 {
            return Err(DecodeError::InvalidWidth { width: num_bits });
        }
        self.ensure(num_bits)?;

        let mut value: u64 = 0;
        let mut bits_read = 0;

        while bits_read < num_bits {
            let byte = self.buffer[self.offset / 8];
            let bit_offset = self.offset % 8;
            let bits_to_read = (num_bits - bits_read).min(8 - bit_offset);
            let mask = if bits_to_read == 8 {
                0xFF
            } else {
                (1u8 << bits_to_read) - 1
            };
            let bits_value = (byte >> (8 - bit_offset - bits_to_read)) & mask;

            value = (value << bits_to_read) | u64::from(bits_value);
            self.offset += bits_to_read;
            bits_read += bits_to_read;
        }

        Ok(value)
    }

    /// Reads a single bit as a boolean flag.
    pub fn read_flag(&mut self) -> DecodeResult<bool> {
        Ok(self.read_uint(1)? == 1)
    }

    /// Reads `num_bits / 8` bytes as characters.
    ///
    /// Bytes are passed through one-to-one (`0x00..=0xFF` map to
    /// `U+0000..=U+00FF`); nothing is escaped or replaced. A width of zero
    /// yields an empty string.
    pub fn read_ascii(&mut self, num_bits: usize) -> DecodeResult<String> {
        if num_bits % 8 != 0 {
            return Err(DecodeError::InvalidWidth { width: num_bits });
        }
        self.ensure(num_bits)?;
        (0..num_bits / 8)
            .map(|_| self.read_uint(8).map(|b| char::from(b as u8)))
            .collect()
    }

    /// Reads `num_bits` as an integer rendered as `0x` followed by exactly
    /// `num_bits / 4` lowercase hex digits.
    pub fn read_hex(&mut self, num_bits: usize) -> DecodeResult<String> {
        let value = self.read_uint(num_bits)?;
        Ok(format!("0x{:0width$x}", value, width = num_bits.div_ceil(4)))
    }

    /// Reads `num_bits` of 90kHz clock ticks and returns them as seconds.
    pub fn read_ninety_k(&mut self, num_bits: usize) -> DecodeResult<f64> {
        Ok(ticks_to_secs(self.read_uint(num_bits)?))
    }

    /// Reads `count` whole bytes.
    pub fn read_bytes(&mut self, count: usize) -> DecodeResult<Vec<u8>> {
        self.ensure(count * 8)?;
        (0..count).map(|_| self.read_uint(8).map(|b| b as u8)).collect()
    }

    /// Skips `num_bits` without interpreting them (reserved or padding bits).
    pub fn advance(&mut self, num_bits: usize) -> DecodeResult<()> {
        self.ensure(num_bits)?;
        self.offset += num_bits;
        Ok(())
    }

    /// Gets the current bit offset in the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bits left in the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len() * 8 - self.offset
    }

    fn ensure(&self, num_bits: usize) -> DecodeResult<()> {
        let remaining = self.remaining();
        if num_bits > remaining {
            return Err(DecodeError::TruncatedInput {
                offset: self.offset,
                requested: num_bits,
                remaining,
            });
        }
        Ok(())
    }
}
