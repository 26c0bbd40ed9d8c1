//! Error types for the frame codec.

use thiserror::Error;

/// Failures reported by the bit packer and the frame codec.
///
/// The first four variants are raised by [`encode`](super::encode) before a
/// single carrier byte is touched. `OutOfCapacity` comes from the bit packer
/// itself and `TruncatedData` is the only structural failure
/// [`decode`](super::decode) can detect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The file name does not fit in the one-byte length field.
    #[error("file name is {len} bytes, at most {max} are allowed", max = super::MAX_NAME_LEN)]
    NameTooLong { len: usize },

    /// The file name holds a character outside the single-byte range.
    #[error("file name character {ch:?} cannot be stored as a single byte")]
    NameNotLatin1 { ch: char },

    /// The payload does not fit in the three-byte length field.
    #[error("payload is {len} bytes, at most {max} are allowed", max = super::MAX_PAYLOAD_LEN)]
    PayloadTooLarge { len: usize },

    /// The carrier buffer cannot hold the whole frame.
    #[error("carrier too small: {required} bytes required, {available} available")]
    CarrierTooSmall { required: usize, available: usize },

    /// A bit group would run past the end of the carrier.
    #[error("no room for an 8-byte group at offset {offset} (carrier is {len} bytes)")]
    OutOfCapacity { offset: usize, len: usize },

    /// Decoding ran past the end of the carrier.
    #[error("hidden data truncated at offset {offset} (carrier is {len} bytes)")]
    TruncatedData { offset: usize, len: usize },
}

/// Result type alias using [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
