//! # Bit Packer
//!
//! Spreads one logical byte over the least significant bits of eight
//! consecutive carrier bytes, most significant bit first, and reads it back.
//!
//! ```text
//! value   = 0b1010_0110
//! carrier = [xxxxxxx1, xxxxxxx0, xxxxxxx1, xxxxxxx0, xxxxxxx0, xxxxxxx1, xxxxxxx1, xxxxxxx0]
//! ```
//!
//! The upper seven bits of every carrier byte are left untouched.

use super::error::{CodecError, Result};

/// Number of carrier bytes consumed by one logical byte.
pub const BITS_PER_BYTE: usize = 8;

fn check_group(len: usize, offset: usize) -> Result<()> {
    match offset.checked_add(BITS_PER_BYTE) {
        Some(end) if end <= len => Ok(()),
        _ => Err(CodecError::OutOfCapacity { offset, len }),
    }
}

/// Embed `value` into `buffer[offset..offset + 8]` and return `offset + 8`.
///
/// # Errors
/// - `OutOfCapacity` if fewer than eight bytes remain; the buffer is not modified.
pub fn encode_byte(value: u8, buffer: &mut [u8], offset: usize) -> Result<usize> {
    check_group(buffer.len(), offset)?;

    for (i, carrier) in buffer[offset..offset + BITS_PER_BYTE].iter_mut().enumerate() {
        let bit = (value >> (7 - i)) & 1;
        *carrier = (*carrier & 0xFE) | bit;
    }

    Ok(offset + BITS_PER_BYTE)
}

/// Rebuild the byte stored at `buffer[offset..offset + 8]`.
///
/// Returns the byte together with the offset of the next group.
///
/// # Errors
/// - `OutOfCapacity` if fewer than eight bytes remain.
pub fn decode_byte(buffer: &[u8], offset: usize) -> Result<(u8, usize)> {
    check_group(buffer.len(), offset)?;

    let value = buffer[offset..offset + BITS_PER_BYTE]
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, carrier)| acc | ((carrier & 1) << (7 - i)));

    Ok((value, offset + BITS_PER_BYTE))
}

/// Sequential writer over a carrier buffer.
///
/// Holds the cursor so callers never thread offsets by hand.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Embed one byte at the cursor and advance it.
    pub fn put(&mut self, value: u8) -> Result<()> {
        self.offset = encode_byte(value, self.buffer, self.offset)?;
        Ok(())
    }

    /// Embed every byte of `values` in order.
    pub fn put_all(&mut self, values: &[u8]) -> Result<()> {
        values.iter().try_for_each(|&value| self.put(value))
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Carrier bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }
}

/// Sequential reader over a carrier buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Read one byte at the cursor and advance it.
    pub fn take(&mut self) -> Result<u8> {
        let (value, next) = decode_byte(self.buffer, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read `count` bytes in order.
    pub fn take_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        // Bounds are checked before allocating.
        let needed = count.saturating_mul(BITS_PER_BYTE);
        if needed > self.remaining() {
            let len = self.buffer.len();
            let offset = self.offset + self.remaining() / BITS_PER_BYTE * BITS_PER_BYTE;
            return Err(CodecError::OutOfCapacity { offset, len });
        }

        (0..count).map(|_| self.take()).collect()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }
}
