//! Types describing an Arion request document.
//!
//! A request names one source image and an ordered list of operations. Each
//! operation is a tagged record: a `type` string plus an operation-specific
//! `params` mapping, kept dynamic here and parsed into typed structs at
//! dispatch time.

use serde::Deserialize;
use serde_json::Value;

/// The top-level request document.
#[derive(Debug, Deserialize, Clone)]
pub struct ImageRequest {
    /// Plain filesystem path or `file://` URL; the two are equivalent.
    pub input_url: String,
    /// Reorient pixel data to visual upright before any operation runs.
    #[serde(default)]
    pub correct_rotation: bool,
    /// Operations to execute, in order.
    pub operations: Vec<OperationSpec>,
}

/// One entry of the operation list.
///
/// `kind` stays a free-form string so an unknown type fails that single
/// operation instead of the whole request parse.
#[derive(Debug, Deserialize, Clone)]
pub struct OperationSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Value,
}

/// The closed set of operations Arion executes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SupportedOperation {
    Resize,
    ReadMeta,
    Fingerprint,
    Copy,
}

impl SupportedOperation {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "resize" => Some(Self::Resize),
            "read_meta" => Some(Self::ReadMeta),
            "fingerprint" => Some(Self::Fingerprint),
            "copy" => Some(Self::Copy),
            _ => None,
        }
    }
}
