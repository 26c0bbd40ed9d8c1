//! # pixel-stash
//!
//! Hides a file inside the least significant bits of an image's pixel data
//! and recovers it, name included.
//!
//! ## Modules
//!
//! - [`codec`]: bit packing and the `(name, payload)` frame layout
//! - [`carrier`]: image files to and from flat RGB buffers
//! - [`stego`]: file-level embed and extract operations
//! - [`report`]: JSON summaries of a run
//! - [`config`]: optional TOML settings
//! - [`logging`]: `env_logger` setup for the binary

pub mod carrier;
pub mod codec;
pub mod config;
pub mod logging;
pub mod report;
pub mod stego;

pub use carrier::CarrierImage;
pub use codec::{CodecError, Frame};
