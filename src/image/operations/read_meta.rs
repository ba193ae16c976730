//! The read_meta operation.

use crate::errors::ArionError;
use crate::image::params::ReadMetaParams;
use crate::image::source::SourceImage;
use crate::output::OperationReport;

/// Report the metadata bundle of the loaded source. The bundle reflects the
/// source bytes as stored; `info: false` acknowledges without reporting.
pub fn run(source: &SourceImage, params: &ReadMetaParams) -> Result<OperationReport, ArionError> {
    let mut report = OperationReport::success("read_meta");
    if params.info {
        report.meta = Some(source.meta.clone());
    }
    Ok(report)
}
