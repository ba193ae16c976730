//! The copy operation.

use std::fs;

use crate::errors::ArionError;
use crate::image::params::CopyParams;
use crate::image::source::{resolve_url, SourceImage};
use crate::output::OperationReport;
use crate::utils::image_utils;

/// Write the source to `output_url`.
///
/// When rotation correction reoriented the pixels the copy is the upright
/// re-encode (format by output extension, falling back to the source
/// format); otherwise it is a byte-identical duplicate.
pub fn run(source: &SourceImage, params: &CopyParams) -> Result<OperationReport, ArionError> {
    let path = resolve_url(&params.output_url);
    if source.rotation_applied {
        let format = image_utils::format_for_path(path).unwrap_or(source.format);
        image_utils::save_image_to_path(&source.pixels, path, format, None)?;
    } else {
        fs::write(path, &source.bytes)
            .map_err(|e| ArionError::Execution(format!("cannot write '{path}': {e}")))?;
    }
    let mut report = OperationReport::success("copy");
    report.output_url = Some(params.output_url.clone());
    Ok(report)
}
