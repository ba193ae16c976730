//! The structured result document emitted on stdout.
//!
//! One [`RunReport`] per invocation, holding one [`OperationReport`] per
//! requested operation in request order. Serialized compact; optional fields
//! are omitted rather than emitted as null.

use serde::Serialize;

use crate::metadata::ImageMeta;

/// Per-operation result record.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_height: Option<u32>,
    #[serde(flatten)]
    pub meta: Option<ImageMeta>,
}

impl OperationReport {
    pub fn success(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            result: true,
            error: None,
            md5: None,
            output_url: None,
            output_width: None,
            output_height: None,
            meta: None,
        }
    }

    pub fn failure(kind: &str, error: String) -> Self {
        Self {
            result: false,
            error: Some(error),
            ..Self::success(kind)
        }
    }
}

/// The top-level result document.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub result: bool,
    pub total_operations: usize,
    pub failed_operations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub info: Vec<OperationReport>,
}

impl RunReport {
    /// A run that failed before any operation executed (request or load
    /// error). Width, height, and md5 are unknown and omitted.
    pub fn failure(error: String) -> Self {
        Self {
            result: false,
            total_operations: 0,
            failed_operations: 0,
            width: None,
            height: None,
            md5: None,
            error: Some(error),
            info: Vec::new(),
        }
    }

    /// Compact JSON, UTF-8.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"result":false,"total_operations":0,"failed_operations":0,"info":[]}"#.to_string()
        })
    }
}
