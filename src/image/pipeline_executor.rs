//! Request execution: parse, load, dispatch, aggregate.
//!
//! Operations run strictly in request order against the shared read-only
//! source. A failure inside one operation is recorded and never aborts the
//! remaining operations; only request-parse and source-load errors end the
//! run early.

use serde_json::Value;

use crate::errors::ArionError;
use crate::image::operations;
use crate::image::params::{self, Validate};
use crate::image::pipeline_types::{ImageRequest, OperationSpec, SupportedOperation};
use crate::image::source::SourceImage;
use crate::output::{OperationReport, RunReport};

/// Run one request document end to end. Never panics; every outcome is a
/// report.
pub fn run_request(input: &str) -> RunReport {
    let request = match parse_request(input) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "request rejected");
            return RunReport::failure(e.to_string());
        }
    };
    let source = match SourceImage::load(&request.input_url, request.correct_rotation) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(input_url = %request.input_url, error = %e, "source load failed");
            return RunReport::failure(e.to_string());
        }
    };
    let info = execute_operations(&source, &request.operations);
    aggregate(&source, info)
}

/// Deserialize and shape-check the request document.
pub fn parse_request(input: &str) -> Result<ImageRequest, ArionError> {
    let request: ImageRequest =
        serde_json::from_str(input).map_err(|e| ArionError::Request(e.to_string()))?;
    if request.input_url.is_empty() {
        return Err(ArionError::Request("input_url must not be empty".to_string()));
    }
    Ok(request)
}

/// Execute every operation in order, one result record each.
pub fn execute_operations(source: &SourceImage, specs: &[OperationSpec]) -> Vec<OperationReport> {
    specs
        .iter()
        .map(|spec| {
            tracing::info!(operation = %spec.kind, "starting operation");
            match execute_single_operation(source, spec) {
                Ok(report) => {
                    tracing::info!(operation = %spec.kind, "operation succeeded");
                    report
                }
                Err(e) => {
                    tracing::error!(operation = %spec.kind, error = %e, "operation failed");
                    OperationReport::failure(&spec.kind, e.to_string())
                }
            }
        })
        .collect()
}

fn execute_single_operation(
    source: &SourceImage,
    spec: &OperationSpec,
) -> Result<OperationReport, ArionError> {
    let Some(operation) = SupportedOperation::parse(&spec.kind) else {
        return Err(ArionError::InvalidParams(format!(
            "unknown operation type '{}'",
            spec.kind
        )));
    };
    match operation {
        SupportedOperation::Resize => {
            let params: params::ResizeParams = parse_params(&spec.params, "resize")?;
            params.validate()?;
            operations::resize::run(source, &params)
        }
        SupportedOperation::ReadMeta => {
            let params: params::ReadMetaParams = parse_params(&spec.params, "read_meta")?;
            params.validate()?;
            operations::read_meta::run(source, &params)
        }
        SupportedOperation::Fingerprint => {
            let params: params::FingerprintParams = parse_params(&spec.params, "fingerprint")?;
            params.validate()?;
            operations::fingerprint::run(source, &params)
        }
        SupportedOperation::Copy => {
            let params: params::CopyParams = parse_params(&spec.params, "copy")?;
            params.validate()?;
            operations::copy::run(source, &params)
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    value: &Value,
    op_name: &str,
) -> Result<T, ArionError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ArionError::InvalidParams(format!("invalid {op_name} parameters: {e}")))
}

/// Compose the top-level document from the per-operation records.
fn aggregate(source: &SourceImage, info: Vec<OperationReport>) -> RunReport {
    let failed = info.iter().filter(|r| !r.result).count();
    RunReport {
        result: failed == 0,
        total_operations: info.len(),
        failed_operations: failed,
        width: Some(source.width),
        height: Some(source.height),
        md5: Some(source.md5.clone()),
        error: None,
        info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use serde_json::json;
    use std::fs;
    use std::io::Cursor;

    fn temp_png(width: u32, height: u32) -> (tempfile::TempDir, String) {
        let img = image::ImageBuffer::from_pixel(width, height, image::Rgba([3u8, 3, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        fs::write(&path, &bytes).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    fn request(input_url: &str, operations: serde_json::Value) -> String {
        json!({
            "input_url": input_url,
            "correct_rotation": true,
            "operations": operations
        })
        .to_string()
    }

    #[test]
    fn test_malformed_json_fails_without_operations() {
        let report = run_request("{\"input_url\": \"x.jpg\"");
        assert!(!report.result);
        assert_eq!(report.total_operations, 0);
        assert_eq!(report.failed_operations, 0);
        assert!(report.info.is_empty());
        assert!(report.width.is_none());
    }

    #[test]
    fn test_missing_source_fails_without_operations() {
        let report = run_request(&request("/no/such/image.jpg", json!([{ "type": "copy" }])));
        assert!(!report.result);
        assert_eq!(report.total_operations, 0);
        assert!(report.info.is_empty());
    }

    #[test]
    fn test_empty_operation_list_succeeds() {
        let (_dir, path) = temp_png(10, 5);
        let report = run_request(&request(&path, json!([])));
        assert!(report.result);
        assert_eq!(report.total_operations, 0);
        assert_eq!(report.failed_operations, 0);
        assert_eq!(report.width, Some(10));
        assert_eq!(report.height, Some(5));
        assert!(report.md5.is_some());
    }

    #[test]
    fn test_unknown_operation_is_isolated_failure() {
        let (_dir, path) = temp_png(10, 5);
        let report = run_request(&request(
            &path,
            json!([
                {"type": "invalid", "params": {}},
                {"type": "fingerprint", "params": {"type": "md5"}}
            ]),
        ));
        assert!(!report.result);
        assert_eq!(report.total_operations, 2);
        assert_eq!(report.failed_operations, 1);
        assert_eq!(report.info[0].kind, "invalid");
        assert!(!report.info[0].result);
        assert!(report.info[0].error.is_some());
        // The pipeline continued
        assert!(report.info[1].result);
        assert!(report.info[1].md5.is_some());
    }

    #[test]
    fn test_missing_params_is_isolated_failure() {
        let (_dir, path) = temp_png(10, 5);
        let report = run_request(&request(&path, json!([{ "type": "read_meta" }])));
        assert!(!report.result);
        assert_eq!(report.failed_operations, 1);
        assert_eq!(report.info[0].kind, "read_meta");
    }

    #[test]
    fn test_info_preserves_request_order() {
        let (dir, path) = temp_png(40, 30);
        let out = dir.path().join("out.png").to_string_lossy().into_owned();
        let report = run_request(&request(
            &path,
            json!([
                {"type": "fingerprint", "params": {"type": "md5"}},
                {"type": "resize", "params": {
                    "type": "fill", "width": 20, "height": 20, "output_url": out
                }},
                {"type": "read_meta", "params": {"info": true}}
            ]),
        ));
        assert!(report.result);
        let kinds: Vec<&str> = report.info.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["fingerprint", "resize", "read_meta"]);
    }

    #[test]
    fn test_totals_count_all_failures() {
        let (_dir, path) = temp_png(10, 5);
        let report = run_request(&request(
            &path,
            json!([
                {"type": "copy", "params": {"output_url": ""}},
                {"type": "copy", "params": {}},
                {"type": "fingerprint", "params": {"type": "md5"}}
            ]),
        ));
        assert!(!report.result);
        assert_eq!(report.total_operations, 3);
        assert_eq!(report.failed_operations, 2);
    }
}
