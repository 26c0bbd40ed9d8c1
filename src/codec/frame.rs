//! # Frame Codec
//!
//! Serializes a `(name, payload)` record into a carrier buffer and reads it back.
//!
//! ## Layout
//!
//! ```text
//! [1 byte name length][name bytes][3 bytes payload length, big-endian][payload bytes]
//! ```
//!
//! Every logical byte is spread over eight carrier bytes by the bit packer,
//! starting at carrier offset 0.
//!
//! ## Limitations
//!
//! The layout carries no magic number or checksum. A carrier that never held a
//! frame decodes into whatever its low bits spell; decoding only fails when the
//! lengths it reads ask for more bytes than the carrier has.

use log::debug;

use super::bits::{BitReader, BitWriter};
use super::capacity::{self, LENGTH_FIELD_BYTES};
use super::error::{CodecError, Result};

/// A decoded frame: the hidden file's name and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Name bytes, one per character.
    pub name: Vec<u8>,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(name: Vec<u8>, payload: Vec<u8>) -> Self {
        Self { name, payload }
    }

    /// The name as a string, mapping each byte to the character with that ordinal.
    pub fn file_name(&self) -> String {
        latin1_string(&self.name)
    }

    /// Carrier bytes this frame occupies.
    pub fn encoded_len(&self) -> usize {
        capacity::required_carrier_len(self.name.len(), self.payload.len())
    }
}

/// Map each byte to the character with that ordinal.
pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Convert a file name to its single-byte form.
///
/// # Errors
/// - `NameNotLatin1` for the first character above U+00FF
pub fn latin1_name(name: &str) -> Result<Vec<u8>> {
    name.chars()
        .map(|ch| u8::try_from(ch).map_err(|_| CodecError::NameNotLatin1 { ch }))
        .collect()
}

/// Write the frame for `name` and `payload` into `buffer`, starting at offset 0.
///
/// Returns the offset just past the frame. Carrier bytes beyond it are untouched.
///
/// # Errors
/// - `NameTooLong`, `PayloadTooLarge`, `CarrierTooSmall`: raised before any byte is written
pub fn encode(buffer: &mut [u8], name: &[u8], payload: &[u8]) -> Result<usize> {
    let required = capacity::check(buffer.len(), name.len(), payload.len())?;
    debug!(
        "Encoding frame: name {} bytes, payload {} bytes, {} of {} carrier bytes",
        name.len(),
        payload.len(),
        required,
        buffer.len()
    );

    // Lengths were validated above, so the narrowing casts are lossless.
    let payload_len = (payload.len() as u32).to_be_bytes();

    let mut writer = BitWriter::new(buffer);
    writer.put(name.len() as u8)?;
    writer.put_all(name)?;
    writer.put_all(&payload_len[4 - LENGTH_FIELD_BYTES..])?;
    writer.put_all(payload)?;

    debug_assert_eq!(writer.offset(), required);
    Ok(writer.offset())
}

/// Read a frame from `buffer`, starting at offset 0.
///
/// # Errors
/// - `TruncatedData` if the decoded lengths run past the end of `buffer`
pub fn decode(buffer: &[u8]) -> Result<Frame> {
    let mut reader = BitReader::new(buffer);

    let name_len = reader.take().map_err(truncated)?;
    let name = reader.take_vec(usize::from(name_len)).map_err(truncated)?;

    let mut len_bytes = [0u8; 4];
    for slot in &mut len_bytes[4 - LENGTH_FIELD_BYTES..] {
        *slot = reader.take().map_err(truncated)?;
    }
    let payload_len = u32::from_be_bytes(len_bytes) as usize;
    debug!(
        "Decoded frame header: name {} bytes, payload {} bytes",
        name_len, payload_len
    );

    let payload = reader.take_vec(payload_len).map_err(truncated)?;

    Ok(Frame { name, payload })
}

fn truncated(err: CodecError) -> CodecError {
    match err {
        CodecError::OutOfCapacity { offset, len } => CodecError::TruncatedData { offset, len },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::capacity::{MAX_NAME_LEN, MAX_PAYLOAD_LEN};

    #[test]
    fn test_small_file_round_trip() {
        let mut carrier = vec![0u8; 100];
        let end = encode(&mut carrier, b"a.txt", b"hi").unwrap();
        assert_eq!(end, 88);

        // Name length 5 = 0b0000_0101, one bit per carrier byte.
        let lsbs: Vec<u8> = carrier[..8].iter().map(|b| b & 1).collect();
        assert_eq!(lsbs, [0, 0, 0, 0, 0, 1, 0, 1]);

        let frame = decode(&carrier).unwrap();
        assert_eq!(frame.file_name(), "a.txt");
        assert_eq!(frame.payload, b"hi");
        assert_eq!(frame.encoded_len(), 88);
        assert!(carrier[88..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_exact_capacity_boundary() {
        let mut exact = vec![0xFFu8; 88];
        assert_eq!(encode(&mut exact, b"a.txt", b"hi"), Ok(88));

        let mut short = vec![0xFFu8; 87];
        assert_eq!(
            encode(&mut short, b"a.txt", b"hi"),
            Err(CodecError::CarrierTooSmall {
                required: 88,
                available: 87
            })
        );
        assert!(short.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_name_length_boundary() {
        let name = vec![b'n'; MAX_NAME_LEN];
        let mut carrier = vec![0u8; 8 * (1 + MAX_NAME_LEN + 3)];
        encode(&mut carrier, &name, &[]).unwrap();
        assert_eq!(decode(&carrier).unwrap().name, name);

        let long = vec![b'n'; MAX_NAME_LEN + 1];
        let mut big = vec![0u8; 8 * 1024];
        assert_eq!(
            encode(&mut big, &long, &[]),
            Err(CodecError::NameTooLong { len: 256 })
        );
        assert!(big.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_payload_too_large() {
        let payload = vec![0u8; MAX_PAYLOAD_LEN + 1];
        let mut carrier = vec![0u8; 64];
        assert_eq!(
            encode(&mut carrier, b"x", &payload),
            Err(CodecError::PayloadTooLarge {
                len: MAX_PAYLOAD_LEN + 1
            })
        );
    }

    #[test]
    fn test_payload_length_is_big_endian() {
        let payload = vec![7u8; 0x0102];
        let mut carrier = vec![0u8; 8 * (4 + payload.len())];
        encode(&mut carrier, b"", &payload).unwrap();

        let mut reader = BitReader::new(&carrier);
        assert_eq!(reader.take().unwrap(), 0);
        assert_eq!(reader.take_vec(3).unwrap(), [0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_decode_truncated() {
        // All-zero carrier too short for the three length bytes.
        assert_eq!(
            decode(&[0u8; 20]),
            Err(CodecError::TruncatedData { offset: 16, len: 20 })
        );
        assert_eq!(
            decode(&[]),
            Err(CodecError::TruncatedData { offset: 0, len: 0 })
        );

        // Header claims a payload far larger than the carrier.
        let mut carrier = vec![0u8; 64];
        let mut writer = BitWriter::new(&mut carrier);
        writer.put_all(&[0, 0xFF, 0xFF, 0xFF]).unwrap();
        assert!(matches!(
            decode(&carrier),
            Err(CodecError::TruncatedData { len: 64, .. })
        ));
    }

    #[test]
    fn test_all_zero_carrier_decodes_empty_frame() {
        let frame = decode(&[0u8; 32]).unwrap();
        assert!(frame.name.is_empty());
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_latin1_name() {
        assert_eq!(latin1_name("café.txt").unwrap(), b"caf\xe9.txt");
        assert_eq!(
            latin1_name("файл"),
            Err(CodecError::NameNotLatin1 { ch: 'ф' })
        );

        let frame = Frame::new(latin1_name("café").unwrap(), Vec::new());
        assert_eq!(frame.file_name(), "café");
    }
}
