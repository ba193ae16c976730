//! Source image acquisition.
//!
//! Resolves the request's `input_url`, reads the bytes, sniffs the container
//! format, decodes pixels, reads the metadata bundle and orientation tag,
//! and (when requested) normalizes the pixel buffer to visual upright.
//! Every operation reads the resulting [`SourceImage`]; none mutates it.

use std::fs;

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use crate::errors::ArionError;
use crate::image::orientation::Orientation;
use crate::metadata::{self, ImageMeta};

/// Strip the optional `file://` scheme; the remainder is a filesystem path,
/// resolved against the working directory when relative.
pub fn resolve_url(url: &str) -> &str {
    url.strip_prefix("file://").unwrap_or(url)
}

/// The decoded source image plus everything operations read from it.
#[derive(Debug)]
pub struct SourceImage {
    /// Pixel buffer, post-orientation when rotation correction ran.
    pub pixels: DynamicImage,
    /// The raw byte stream as read from disk.
    pub bytes: Vec<u8>,
    /// Container format, detected by content.
    pub format: ImageFormat,
    /// Dimensions of `pixels` (post-orientation).
    pub width: u32,
    pub height: u32,
    /// Hex digest of `bytes`.
    pub md5: String,
    /// Descriptive metadata as stored in the source bytes.
    pub meta: ImageMeta,
    /// Orientation tag as stored in the source bytes.
    pub orientation: Orientation,
    /// Whether the pixel buffer was reoriented at load time. When set,
    /// derivatives must re-encode instead of duplicating bytes.
    pub rotation_applied: bool,
}

impl SourceImage {
    pub fn load(input_url: &str, correct_rotation: bool) -> Result<Self, ArionError> {
        if input_url.is_empty() {
            return Err(ArionError::Request("input_url must not be empty".to_string()));
        }
        let path = resolve_url(input_url);
        let bytes = fs::read(path)
            .map_err(|e| ArionError::SourceLoad(format!("cannot read '{path}': {e}")))?;
        let format = image::guess_format(&bytes)
            .map_err(|e| ArionError::SourceLoad(format!("unrecognized image data: {e}")))?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff) {
            return Err(ArionError::SourceLoad(format!(
                "unsupported format {format:?}; expected JPEG, PNG, or TIFF"
            )));
        }
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| ArionError::SourceLoad(format!("decode failed: {e}")))?;

        let md5 = format!("{:x}", md5::compute(&bytes));
        let meta = metadata::read(&bytes, format);
        let orientation = metadata::read_orientation(&bytes)
            .and_then(Orientation::from_exif)
            .unwrap_or_default();

        let (pixels, rotation_applied) = if correct_rotation && !orientation.is_identity() {
            debug!(tag = orientation.to_exif(), "normalizing orientation");
            (orientation.apply(decoded), true)
        } else {
            (decoded, false)
        };
        let (width, height) = pixels.dimensions();

        Ok(Self {
            pixels,
            bytes,
            format,
            width,
            height,
            md5,
            meta,
            orientation,
            rotation_applied,
        })
    }
}
