#![allow(dead_code)]

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;
use std::path::PathBuf;

/// Creates a test image with the specified dimensions filled with a solid
/// color (red).
pub fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
        width,
        height,
        Rgba([255u8, 0u8, 0u8, 255u8]),
    ))
}

/// A 100x200 pattern with three vertical bands: red (x < 40), green
/// (40 <= x < 60), blue (x >= 60). Used for gravity crop checks.
pub fn banded_test_image() -> DynamicImage {
    let buf = ImageBuffer::from_fn(100, 200, |x, _| {
        if x < 40 {
            Rgba([255u8, 0, 0, 255])
        } else if x < 60 {
            Rgba([0u8, 255, 0, 255])
        } else {
            Rgba([0u8, 0, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(buf)
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    if format == ImageFormat::Jpeg {
        image
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("failed to encode test image");
    } else {
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("failed to encode test image");
    }
    bytes
}

/// Writes bytes into a temp dir and returns the directory guard plus path.
pub fn write_temp_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("failed to write test file");
    path.to_string_lossy().into_owned()
}

pub fn temp_path(dir: &tempfile::TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Splice a minimal EXIF APP1 segment carrying just an orientation tag into
/// a JPEG byte stream, right after SOI.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");

    // Big-endian TIFF: header, one-entry IFD0 with tag 0x0112 (SHORT)
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut payload = b"Exif\x00\x00".to_vec();
    payload.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// An IPTC IIM record-2 dataset for [`with_iptc`].
pub struct IptcField {
    pub dataset: u8,
    pub value: Vec<u8>,
}

impl IptcField {
    pub fn new(dataset: u8, value: &str) -> Self {
        Self {
            dataset,
            value: value.as_bytes().to_vec(),
        }
    }
}

/// Splice a Photoshop APP13 segment carrying the given IPTC record-2
/// datasets into a JPEG byte stream, right after SOI.
pub fn with_iptc(jpeg: &[u8], fields: &[IptcField]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");

    let mut iim = Vec::new();
    for field in fields {
        iim.extend_from_slice(&[0x1C, 2, field.dataset]);
        iim.extend_from_slice(&(field.value.len() as u16).to_be_bytes());
        iim.extend_from_slice(&field.value);
    }

    let mut payload = b"Photoshop 3.0\x00".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&0x0404u16.to_be_bytes());
    payload.extend_from_slice(&[0x00, 0x00]); // empty pascal name, padded
    payload.extend_from_slice(&(iim.len() as u32).to_be_bytes());
    payload.extend_from_slice(&iim);
    if iim.len() % 2 != 0 {
        payload.push(0x00);
    }

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xED];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Loads a saved test output for inspection.
pub fn load_output(path: &str) -> DynamicImage {
    image::open(PathBuf::from(path)).expect("failed to load output image")
}
