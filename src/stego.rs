//! # File Steganography
//!
//! Hides whole files inside carrier images and recovers them, using the
//! [`codec`](crate::codec) frame layout over the image's RGB samples.
//!
//! ## Embedding
//! 1. Check that the input is a regular file no larger than 16 777 215 bytes
//! 2. Open the carrier, refuse palette or lossy formats, and flatten it to RGB bytes
//! 3. Write `[name length][name][payload length][payload]` into the LSBs
//! 4. Save the result in the carrier's own format
//!
//! ## Extracting
//! 1. Open the stego'd image and flatten it the same way
//! 2. Decode the frame
//! 3. Write the payload to the chosen destination
//!
//! ### Capacity
//! An image can hide about `(width * height * 3) / 8 - 4 - name length` bytes.
//! Example: an 800x600 image holds roughly 175 KiB.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::carrier::CarrierImage;
use crate::codec::{self, Frame, MAX_PAYLOAD_LEN};

/// Outcome of an embed or extract call.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Image that was read
    pub carrier: PathBuf,
    /// File that was written (stego'd image or recovered file)
    pub output: PathBuf,
    /// Name stored in the frame
    pub file_name: String,
    pub payload_len: usize,
    /// Carrier buffer length in bytes
    pub carrier_len: usize,
    /// Carrier bytes covered by the frame
    pub bytes_used: usize,
    pub dimensions: (u32, u32),
}

/// Hide `infile` inside the image at `image`.
///
/// When `outfile` is `None` the result is written next to `infile`, with the
/// carrier's extension appended (`secret.txt` + `cover.bmp` -> `secret.txt.bmp`).
///
/// # Errors
/// - `infile` is missing, not a regular file, or larger than 16 777 215 bytes
/// - the carrier cannot be opened or is too small for the frame
/// - the carrier's format would not keep the low bits (GIF, JPEG, ...)
/// - the result cannot be saved
pub fn embed_file(image: &Path, infile: &Path, outfile: Option<&Path>) -> Result<Summary> {
    let meta =
        fs::metadata(infile).with_context(|| format!("No such file {}", infile.display()))?;
    if !meta.is_file() {
        bail!(
            "{} must be a regular file but is either a directory or special file",
            infile.display()
        );
    }
    if meta.len() > MAX_PAYLOAD_LEN as u64 {
        bail!(
            "{} is too big; must be <= {} bytes, is {} bytes",
            infile.display(),
            MAX_PAYLOAD_LEN,
            meta.len()
        );
    }

    let name = embedded_name(
        infile
            .file_name()
            .ok_or_else(|| anyhow!("{} has no file name", infile.display()))?,
    )?;
    let file_name = codec::latin1_string(&name);

    let output = outfile
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_embed_output(infile, image));

    let mut carrier = CarrierImage::open(image)?;
    carrier.ensure_preserves_lsbs()?;
    // Fail on size before reading the payload into memory.
    codec::capacity::check(carrier.len(), name.len(), meta.len() as usize).with_context(|| {
        format!(
            "Image {} is too small to hold {}",
            image.display(),
            infile.display()
        )
    })?;

    let payload = fs::read(infile)
        .with_context(|| format!("Failed to read from source file {}", infile.display()))?;
    let bytes_used = codec::encode(carrier.pixels_mut(), &name, &payload)?;
    debug!(
        "Frame covers {} of {} carrier bytes",
        bytes_used,
        carrier.len()
    );

    carrier.save(&output)?;
    info!(
        "Hid {} ({} bytes) in {}",
        file_name,
        payload.len(),
        output.display()
    );

    Ok(Summary {
        carrier: image.to_path_buf(),
        output,
        file_name,
        payload_len: payload.len(),
        carrier_len: carrier.len(),
        bytes_used,
        dimensions: carrier.dimensions(),
    })
}

/// Recover the hidden file from the image at `image`.
///
/// See [`extract_destination`] for how the output path is chosen.
///
/// # Errors
/// - the image cannot be opened
/// - the decoded lengths run past the end of the carrier
/// - the recovered file cannot be written
pub fn extract_file(
    image: &Path,
    outfile: Option<&Path>,
    keep_extension: bool,
    output_dir: &Path,
) -> Result<Summary> {
    let carrier = CarrierImage::open(image)?;
    let frame = codec::decode(carrier.pixels()).with_context(|| {
        format!("{} does not hold a complete hidden file", image.display())
    })?;

    let file_name = frame.file_name();
    let output = extract_destination(&file_name, outfile, keep_extension, output_dir)?;

    fs::write(&output, &frame.payload)
        .with_context(|| format!("Couldn't write recovered file to {}", output.display()))?;
    info!(
        "Recovered {} ({} bytes) to {}",
        file_name,
        frame.payload.len(),
        output.display()
    );

    Ok(Summary {
        carrier: image.to_path_buf(),
        output,
        file_name,
        payload_len: frame.payload.len(),
        carrier_len: carrier.len(),
        bytes_used: frame.encoded_len(),
        dimensions: carrier.dimensions(),
    })
}

/// Choose where a recovered file is written.
///
/// - no `outfile`: `output_dir` joined with the final component of the hidden name
/// - `outfile` with `keep_extension`: `outfile` plus the hidden name's extension
/// - otherwise: `outfile`
///
/// # Errors
/// - no `outfile` and the hidden name has no usable final component (empty, `..`)
pub fn extract_destination(
    file_name: &str,
    outfile: Option<&Path>,
    keep_extension: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    let hidden = Path::new(file_name);

    match outfile {
        None => {
            let base = hidden
                .file_name()
                .ok_or_else(|| anyhow!("Hidden file name {:?} is not usable", file_name))?;
            if base != hidden.as_os_str() {
                warn!(
                    "Hidden file name {:?} contains directories; saving as {:?}",
                    file_name, base
                );
            }
            Ok(output_dir.join(base))
        }
        Some(out) if keep_extension => match hidden.extension() {
            Some(ext) => Ok(append_extension(out, ext)),
            None => {
                warn!(
                    "Encoded filename has no extension; file will be saved to {}",
                    out.display()
                );
                Ok(out.to_path_buf())
            }
        },
        Some(out) => Ok(out.to_path_buf()),
    }
}

/// Hide `payload` under `name` in an in-memory image and return PNG bytes.
///
/// Any decodable carrier is accepted, since the result is always PNG.
pub fn embed_bytes(image_bytes: &[u8], name: &str, payload: &[u8]) -> Result<Vec<u8>> {
    let mut carrier = CarrierImage::from_memory(image_bytes)?;
    let name = codec::latin1_name(name)?;

    codec::encode(carrier.pixels_mut(), &name, payload)?;
    carrier.to_png_bytes()
}

/// Recover the frame hidden in an in-memory image.
pub fn extract_bytes(image_bytes: &[u8]) -> Result<Frame> {
    let carrier = CarrierImage::from_memory(image_bytes)?;
    Ok(codec::decode(carrier.pixels())?)
}

/// Name bytes stored in the frame for a file called `file_name`.
///
/// Unicode names are stored one byte per character and must stay within
/// U+00FF. On Unix a name that is not valid Unicode is stored as its raw bytes.
fn embedded_name(file_name: &OsStr) -> Result<Vec<u8>> {
    if let Some(name) = file_name.to_str() {
        return Ok(codec::latin1_name(name)?);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Ok(file_name.as_bytes().to_vec())
    }
    #[cfg(not(unix))]
    {
        Err(anyhow!("File name {:?} is not valid Unicode", file_name))
    }
}

fn default_embed_output(infile: &Path, image: &Path) -> PathBuf {
    match image.extension() {
        Some(ext) => append_extension(infile, ext),
        None => infile.to_path_buf(),
    }
}

fn append_extension(path: &Path, ext: &OsStr) -> PathBuf {
    let mut joined = path.as_os_str().to_os_string();
    joined.push(".");
    joined.push(ext);
    PathBuf::from(joined)
}
