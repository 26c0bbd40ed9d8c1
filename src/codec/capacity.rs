//! Capacity arithmetic for the frame layout.
//!
//! A frame of `n` name bytes and `p` payload bytes occupies
//! `8 × (1 + n + 3 + p)` carrier bytes.

use super::bits::BITS_PER_BYTE;
use super::error::{CodecError, Result};

/// Longest file name the one-byte length field can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Largest payload the three-byte length field can describe (2^24 - 1).
pub const MAX_PAYLOAD_LEN: usize = (1 << 24) - 1;

/// Width of the big-endian payload length field.
pub const LENGTH_FIELD_BYTES: usize = 3;

/// Logical bytes taken by the two length fields.
const HEADER_BYTES: usize = 1 + LENGTH_FIELD_BYTES;

/// Carrier bytes needed to hold a frame with the given name and payload lengths.
pub fn required_carrier_len(name_len: usize, payload_len: usize) -> usize {
    BITS_PER_BYTE * (HEADER_BYTES + name_len + payload_len)
}

/// Largest payload that fits next to a name of `name_len` bytes.
///
/// Returns 0 when not even the header and name fit.
pub fn max_payload_len(carrier_len: usize, name_len: usize) -> usize {
    (carrier_len / BITS_PER_BYTE)
        .saturating_sub(HEADER_BYTES + name_len)
        .min(MAX_PAYLOAD_LEN)
}

/// Run the encode-time validations in order and return the carrier bytes required.
///
/// # Errors
/// - `NameTooLong` if `name_len > 255`
/// - `PayloadTooLarge` if `payload_len > 16_777_215`
/// - `CarrierTooSmall` if the frame does not fit in `carrier_len` bytes
pub fn check(carrier_len: usize, name_len: usize, payload_len: usize) -> Result<usize> {
    if name_len > MAX_NAME_LEN {
        return Err(CodecError::NameTooLong { len: name_len });
    }
    if payload_len > MAX_PAYLOAD_LEN {
        return Err(CodecError::PayloadTooLarge { len: payload_len });
    }

    let required = required_carrier_len(name_len, payload_len);
    if required > carrier_len {
        return Err(CodecError::CarrierTooSmall {
            required,
            available: carrier_len,
        });
    }

    Ok(required)
}
