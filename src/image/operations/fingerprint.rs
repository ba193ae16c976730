//! The fingerprint operation.

use crate::errors::ArionError;
use crate::image::params::{FingerprintKind, FingerprintParams};
use crate::image::source::SourceImage;
use crate::output::OperationReport;

/// Digest the source byte stream as received (not the decoded pixels).
pub fn run(source: &SourceImage, params: &FingerprintParams) -> Result<OperationReport, ArionError> {
    match params.kind {
        FingerprintKind::Md5 => {
            let mut report = OperationReport::success("fingerprint");
            report.md5 = Some(source.md5.clone());
            Ok(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_digest_matches_source_bytes() {
        let img = image::ImageBuffer::from_pixel(3, 3, image::Rgba([1u8, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        fs::write(&path, &bytes).unwrap();
        let source = SourceImage::load(&path.to_string_lossy(), false).unwrap();

        let report = run(&source, &FingerprintParams { kind: FingerprintKind::Md5 }).unwrap();
        let digest = report.md5.unwrap();
        assert_eq!(digest, format!("{:x}", md5::compute(&bytes)));
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        // Stable across invocations on unchanged bytes
        let again = run(&source, &FingerprintParams { kind: FingerprintKind::Md5 }).unwrap();
        assert_eq!(again.md5.unwrap(), digest);
    }
}
