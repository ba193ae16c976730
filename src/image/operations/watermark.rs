//! Watermark compositing.
//!
//! Overlays a watermark image onto a resized output, centered, with either a
//! fixed (`standard`) or size-dependent (`adaptive`) opacity. The overlay is
//! clipped to the output when it would overhang; it is never tiled.

use std::fs;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::errors::ArionError;
use crate::image::params::{ResizeParams, WatermarkKind};
use crate::image::source::resolve_url;

/// Sizing and opacity policy for one watermark application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatermarkSizing {
    /// Watermark width equals output width; opacity is the fixed amount.
    Standard { amount: f64 },
    /// Watermark size tracks the shorter output edge between `min` and
    /// `max`; opacity fades as coverage grows.
    Adaptive { min: f64, max: f64 },
}

/// A watermark configuration extracted from validated resize params.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkPlan {
    pub url: String,
    pub sizing: WatermarkSizing,
}

impl WatermarkPlan {
    /// `None` when the resize carries no watermark. Assumes the params
    /// already passed validation.
    pub fn from_params(params: &ResizeParams) -> Option<Self> {
        let url = params.watermark_url.clone()?;
        let sizing = match params.watermark_type? {
            WatermarkKind::Standard => WatermarkSizing::Standard {
                amount: params.watermark_amount?,
            },
            WatermarkKind::Adaptive => WatermarkSizing::Adaptive {
                min: params.watermark_min?,
                max: params.watermark_max?,
            },
        };
        Some(Self { url, sizing })
    }
}

/// Composite the configured watermark onto `image`, centered.
pub fn apply(image: DynamicImage, plan: &WatermarkPlan) -> Result<DynamicImage, ArionError> {
    let path = resolve_url(&plan.url);
    let bytes = fs::read(path)
        .map_err(|e| ArionError::Execution(format!("cannot read watermark '{path}': {e}")))?;
    let watermark = image::load_from_memory(&bytes)
        .map_err(|e| ArionError::Execution(format!("cannot decode watermark '{path}': {e}")))?;

    let (ow, oh) = image.dimensions();
    let (ww, wh) = watermark.dimensions();
    let (target_w, opacity) = match plan.sizing {
        WatermarkSizing::Standard { amount } => (ow, amount),
        WatermarkSizing::Adaptive { min, max } => adaptive_layout(ow, oh, ww, wh, min, max),
    };
    let target_h = ((target_w as u64 * wh as u64 + ww as u64 / 2) / ww as u64).max(1) as u32;

    let scaled = watermark
        .resize_exact(target_w, target_h.max(1), FilterType::Lanczos3)
        .to_rgba8();
    Ok(composite_centered(image, &scaled, opacity as f32))
}

/// Adaptive size and opacity.
///
/// The contract pins the endpoints and monotonicity; the interior curve is
/// this implementation's choice. With `edge = min(ow, oh)` the watermark's
/// longer side is scaled to `edge`, its width clamped into
/// `[min*edge, max*edge]`, and coverage `c = width / edge` drives opacity:
/// 1.0 at `c <= min`, fading linearly to `min` at `c >= max`.
fn adaptive_layout(ow: u32, oh: u32, ww: u32, wh: u32, min: f64, max: f64) -> (u32, f64) {
    let edge = ow.min(oh) as f64;
    let scale = edge / ww.max(wh) as f64;
    let width = (scale * ww as f64).clamp(min * edge, max * edge);
    let coverage = width / edge;
    let opacity = if coverage <= min {
        1.0
    } else if coverage >= max {
        min
    } else {
        1.0 - (coverage - min) / (max - min) * (1.0 - min)
    };
    ((width.round() as u32).max(1), opacity)
}

/// Alpha-blend `overlay` onto the center of `base`. Overhang is clipped,
/// keeping the centers aligned.
fn composite_centered(
    base: DynamicImage,
    overlay: &image::RgbaImage,
    opacity: f32,
) -> DynamicImage {
    let mut out = base.to_rgba8();
    let (bw, bh) = out.dimensions();
    let (ow, oh) = overlay.dimensions();
    let x0 = (bw as i64 - ow as i64) / 2;
    let y0 = (bh as i64 - oh as i64) / 2;

    for wy in 0..oh {
        let by = y0 + wy as i64;
        if by < 0 || by >= bh as i64 {
            continue;
        }
        for wx in 0..ow {
            let bx = x0 + wx as i64;
            if bx < 0 || bx >= bw as i64 {
                continue;
            }
            let px = overlay.get_pixel(wx, wy);
            let alpha = px[3] as f32 / 255.0 * opacity;
            if alpha <= 0.0 {
                continue;
            }
            let base_px = out.get_pixel_mut(bx as u32, by as u32);
            for c in 0..3 {
                base_px[c] =
                    ((1.0 - alpha) * base_px[c] as f32 + alpha * px[c] as f32).round() as u8;
            }
        }
    }
    DynamicImage::ImageRgba8(out)
}
