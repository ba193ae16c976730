use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use crate::errors::ArionError;

/// Infer the output format from a path's extension.
pub fn format_for_path(path: &str) -> Result<ImageFormat, ArionError> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        _ => Err(ArionError::InvalidParams(format!(
            "cannot infer output format from '{path}'"
        ))),
    }
}

/// Encode `image` to `path`.
///
/// Encoding through the image crate writes no EXIF/IPTC/XMP blocks, so
/// derivatives are metadata-stripped by construction. `quality` applies to
/// JPEG only; `None` uses the encoder default.
pub fn save_image_to_path(
    image: &DynamicImage,
    path: &str,
    format: ImageFormat,
    quality: Option<u8>,
) -> Result<(), ArionError> {
    match format {
        ImageFormat::Jpeg => {
            let file = File::create(path)
                .map_err(|e| ArionError::Execution(format!("cannot write '{path}': {e}")))?;
            let mut writer = BufWriter::new(file);
            let mut encoder = match quality {
                Some(q) => JpegEncoder::new_with_quality(&mut writer, q),
                None => JpegEncoder::new(&mut writer),
            };
            // JPEG has no alpha channel
            encoder
                .encode_image(&image.to_rgb8())
                .map_err(|e| ArionError::Execution(format!("encode failed for '{path}': {e}")))
        }
        _ => image
            .save_with_format(path, format)
            .map_err(|e| ArionError::Execution(format!("encode failed for '{path}': {e}"))),
    }
}
