//! # Carrier Images
//!
//! Bridges image files and the flat pixel buffer the [`codec`](crate::codec) works on.
//!
//! Every carrier is converted to 8-bit RGB, so the buffer holds
//! `width * height * 3` bytes, one per channel sample. Alpha channels are
//! dropped on load. When saved, the buffer is written back with the carrier's
//! original dimensions and file format, which must be one that stores 8-bit
//! RGB samples exactly (PNG, BMP, TIFF, PNM). Palette and lossy formats such
//! as GIF and JPEG rewrite the low bits and are refused.

use anyhow::{anyhow, bail, Context, Result};
use image::{ImageFormat, RgbImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

use crate::codec;

/// Channel samples per pixel in the carrier buffer.
pub const CHANNELS: usize = 3;

/// A decoded image exposed as a mutable RGB byte buffer.
#[derive(Debug, Clone)]
pub struct CarrierImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl CarrierImage {
    /// Open and decode the image at `path`, detecting its format from the contents.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = image::io::Reader::open(path)
            .with_context(|| format!("Could not open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Could not read {}", path.display()))?;

        let format = reader
            .format()
            .ok_or_else(|| anyhow!("Unrecognised image format: {}", path.display()))?;
        let img = reader
            .decode()
            .with_context(|| format!("Could not decode {}", path.display()))?;

        debug!("Opened {} as {:?}", path.display(), format);
        Ok(Self::from_rgb(img.to_rgb8(), format))
    }

    /// Decode an image held in memory.
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes).context("Unrecognised image format")?;
        let img = image::load_from_memory_with_format(bytes, format)
            .context("Could not decode image")?;

        Ok(Self::from_rgb(img.to_rgb8(), format))
    }

    fn from_rgb(img: RgbImage, format: ImageFormat) -> Self {
        let (width, height) = img.dimensions();
        Self {
            pixels: img.into_raw(),
            width,
            height,
            format,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Length of the carrier buffer in bytes.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether saving in the carrier's own format keeps every sample bit.
    pub fn preserves_lsbs(&self) -> bool {
        preserves_lsbs(self.format)
    }

    /// Fail unless [`save`](Self::save) can write this carrier back unchanged.
    pub fn ensure_preserves_lsbs(&self) -> Result<()> {
        if !self.preserves_lsbs() {
            bail!(
                "{:?} carriers cannot keep hidden data; convert the image to PNG or BMP first",
                self.format
            );
        }
        Ok(())
    }

    /// Largest payload this image can hide next to a name of `name_len` bytes.
    pub fn capacity(&self, name_len: usize) -> usize {
        codec::max_payload_len(self.pixels.len(), name_len)
    }

    fn to_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| anyhow!("Pixel buffer does not match {}x{}", self.width, self.height))
    }

    /// Write the image to `path` in the carrier's original format.
    ///
    /// # Errors
    /// - the format would alter the samples (see [`ensure_preserves_lsbs`](Self::ensure_preserves_lsbs))
    /// - the file cannot be encoded or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.ensure_preserves_lsbs()?;

        self.to_image()?
            .save_with_format(path, self.format)
            .with_context(|| format!("Couldn't save result image to {}", path.display()))
    }

    /// Encode the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut output_bytes = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
            .context("Could not encode PNG")?;

        Ok(output_bytes)
    }
}

fn preserves_lsbs(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Pnm
    )
}
