use serde::Deserialize;

use crate::errors::ArionError;
use crate::image::geometry::{Gravity, ResizeMode, MAX_DIMENSION};

/// Parameter records that can check themselves beyond what deserialization
/// enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), ArionError>;
}

/// Watermark flavor carried on a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    Standard,
    Adaptive,
}

/// Fingerprint digest algorithms. md5 is the only one accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintKind {
    Md5,
}

#[derive(Debug, Deserialize)]
pub struct ResizeParams {
    #[serde(rename = "type")]
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
    pub output_url: String,
    #[serde(default)]
    pub gravity: Option<Gravity>,
    #[serde(default)]
    pub quality: Option<u8>,
    #[serde(default)]
    pub watermark_url: Option<String>,
    #[serde(default)]
    pub watermark_type: Option<WatermarkKind>,
    #[serde(default)]
    pub watermark_amount: Option<f64>,
    #[serde(default)]
    pub watermark_min: Option<f64>,
    #[serde(default)]
    pub watermark_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ReadMetaParams {
    pub info: bool,
}

#[derive(Debug, Deserialize)]
pub struct FingerprintParams {
    #[serde(rename = "type")]
    pub kind: FingerprintKind,
}

#[derive(Debug, Deserialize)]
pub struct CopyParams {
    pub output_url: String,
}

impl Validate for ResizeParams {
    fn validate(&self) -> Result<(), ArionError> {
        if self.width == 0 || self.height == 0 {
            return Err(ArionError::InvalidParams(
                "width and height must be positive".to_string(),
            ));
        }
        // Both requested values are checked, even when one would be capped
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ArionError::InvalidParams(format!(
                "requested dimensions {}x{} exceed the maximum of {} per side",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if self.output_url.is_empty() {
            return Err(ArionError::InvalidParams(
                "output_url must not be empty".to_string(),
            ));
        }
        if let Some(quality) = self.quality {
            if !(1..=100).contains(&quality) {
                return Err(ArionError::InvalidParams(format!(
                    "quality must be between 1 and 100, got {quality}"
                )));
            }
        }
        if self.mode == ResizeMode::Square {
            if let Some(gravity) = self.gravity {
                if gravity != Gravity::Center {
                    return Err(ArionError::InvalidParams(
                        "gravity is only supported for fill resizes".to_string(),
                    ));
                }
            }
        }
        self.validate_watermark()
    }
}

impl ResizeParams {
    fn validate_watermark(&self) -> Result<(), ArionError> {
        let Some(url) = &self.watermark_url else {
            return Ok(());
        };
        if url.is_empty() {
            return Err(ArionError::InvalidParams(
                "watermark_url must not be empty".to_string(),
            ));
        }
        match self.watermark_type {
            None => Err(ArionError::InvalidParams(
                "watermark_type is required when watermark_url is set".to_string(),
            )),
            Some(WatermarkKind::Standard) => match self.watermark_amount {
                Some(amount) if (0.0..=1.0).contains(&amount) => Ok(()),
                Some(amount) => Err(ArionError::InvalidParams(format!(
                    "watermark_amount must be between 0.0 and 1.0, got {amount}"
                ))),
                None => Err(ArionError::InvalidParams(
                    "watermark_amount is required for a standard watermark".to_string(),
                )),
            },
            Some(WatermarkKind::Adaptive) => {
                let (min, max) = match (self.watermark_min, self.watermark_max) {
                    (Some(min), Some(max)) => (min, max),
                    _ => {
                        return Err(ArionError::InvalidParams(
                            "watermark_min and watermark_max are required for an adaptive watermark"
                                .to_string(),
                        ))
                    }
                };
                if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) {
                    return Err(ArionError::InvalidParams(
                        "watermark_min and watermark_max must be between 0.0 and 1.0".to_string(),
                    ));
                }
                if min > max {
                    return Err(ArionError::InvalidParams(format!(
                        "watermark_min ({min}) must not exceed watermark_max ({max})"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Validate for ReadMetaParams {
    fn validate(&self) -> Result<(), ArionError> {
        Ok(())
    }
}

impl Validate for FingerprintParams {
    fn validate(&self) -> Result<(), ArionError> {
        Ok(())
    }
}

impl Validate for CopyParams {
    fn validate(&self) -> Result<(), ArionError> {
        if self.output_url.is_empty() {
            return Err(ArionError::InvalidParams(
                "output_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
