//! # Frame Codec
//!
//! Hides a file's name and bytes in the least significant bits of a flat
//! carrier buffer (one byte per color channel sample) and recovers them.
//!
//! ## Modules
//!
//! - [`bits`]: one logical byte to/from eight carrier bytes, MSB first
//! - [`frame`]: the length-prefixed `(name, payload)` record
//! - [`capacity`]: size limits and carrier arithmetic
//! - [`error`]: the [`CodecError`] taxonomy
//!
//! The codec never touches a filesystem or an image decoder; see
//! [`crate::carrier`] for that side.

pub mod bits;
pub mod capacity;
pub mod error;
pub mod frame;

pub use bits::{decode_byte, encode_byte, BitReader, BitWriter, BITS_PER_BYTE};
pub use capacity::{
    max_payload_len, required_carrier_len, LENGTH_FIELD_BYTES, MAX_NAME_LEN, MAX_PAYLOAD_LEN,
};
pub use error::{CodecError, Result};
pub use frame::{decode, encode, latin1_name, latin1_string, Frame};
