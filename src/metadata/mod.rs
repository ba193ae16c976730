//! Image metadata: the descriptive bundle reported by `read_meta` and the
//! EXIF orientation tag consumed by the source loader.
//!
//! The bundle models IPTC IIM fields the way they surface in the result
//! document: missing fields are empty strings, empty lists, or `false`,
//! never a distinct absent value.

use serde::Serialize;

pub mod iptc;

/// Descriptive metadata extracted from a source image.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageMeta {
    pub model_released: bool,
    pub property_released: bool,
    pub special_instructions: String,
    pub subject: String,
    pub copyright: String,
    pub city: String,
    pub province_state: String,
    pub country_name: String,
    pub country_code: String,
    pub caption: String,
    pub keywords: Vec<String>,
}

/// Read the metadata bundle from raw image bytes.
///
/// IPTC IIM lives in JPEG APP13 segments; other formats yield the default
/// (empty) bundle. Release flags are not IIM datasets and stay `false`
/// unless release metadata is present.
pub fn read(bytes: &[u8], format: image::ImageFormat) -> ImageMeta {
    let mut meta = ImageMeta::default();
    if format != image::ImageFormat::Jpeg {
        return meta;
    }
    for ds in iptc::datasets(bytes) {
        if ds.record != 2 {
            continue;
        }
        let text = || String::from_utf8_lossy(&ds.data).into_owned();
        match ds.dataset {
            iptc::SUBJECT_REFERENCE => meta.subject = text(),
            iptc::KEYWORDS => meta.keywords.push(text()),
            iptc::SPECIAL_INSTRUCTIONS => meta.special_instructions = text(),
            iptc::CITY => meta.city = text(),
            iptc::PROVINCE_STATE => meta.province_state = text(),
            iptc::COUNTRY_CODE => meta.country_code = text(),
            iptc::COUNTRY_NAME => meta.country_name = text(),
            iptc::COPYRIGHT_NOTICE => meta.copyright = text(),
            iptc::CAPTION => meta.caption = text(),
            _ => {}
        }
    }
    meta
}

/// Read the raw EXIF orientation tag (1-8) from an image container.
///
/// Returns `None` when the container carries no EXIF block or no orientation
/// field. Works for JPEG and TIFF; PNG rarely embeds one.
pub fn read_orientation(bytes: &[u8]) -> Option<u8> {
    let reader = exif::Reader::new();
    let parsed = reader
        .read_from_container(&mut std::io::Cursor::new(bytes))
        .ok()?;
    let field = parsed.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0).map(|v| v as u8)
}
