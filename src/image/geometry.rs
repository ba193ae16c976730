//! Resize geometry: output sizing for the four resize modes and crop-window
//! placement for the nine-valued gravity model.
//!
//! All dimension scaling rounds half-up; crop origins use floor division.

use serde::Deserialize;

/// Hard ceiling on any requested output dimension.
pub const MAX_DIMENSION: u32 = 10000;

/// The four resize modes.
///
/// `width` and `height` preserve aspect and never enlarge; the named
/// dimension is primary and the other acts as a cap. `square` center-crops
/// then scales. `fill` produces exactly the requested dimensions by scaling
/// to cover and cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    Width,
    Height,
    Square,
    Fill,
}

/// Crop-window anchor for `fill` resizes: center plus the eight compass
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    Center,
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

/// A crop window in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The computed plan for one resize: what to scale to, and which crop to
/// apply on which side of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// Aspect-preserving scale, no crop (`width`/`height` modes).
    Scale { width: u32, height: u32 },
    /// Center-crop the source to a square, then scale (`square` mode).
    CropThenScale { crop: CropWindow, side: u32 },
    /// Scale to cover, then crop to the requested window (`fill` mode).
    ScaleThenCrop {
        width: u32,
        height: u32,
        crop: CropWindow,
    },
}

impl ResizePlan {
    /// Final output dimensions of the plan.
    pub fn output_dimensions(&self) -> (u32, u32) {
        match *self {
            ResizePlan::Scale { width, height } => (width, height),
            ResizePlan::CropThenScale { side, .. } => (side, side),
            ResizePlan::ScaleThenCrop { crop, .. } => (crop.width, crop.height),
        }
    }
}

/// Compute the resize plan for a source of `sw x sh` and a request of
/// `rw x rh`. Inputs are assumed validated (all nonzero, within
/// [`MAX_DIMENSION`]).
pub fn plan(mode: ResizeMode, gravity: Gravity, sw: u32, sh: u32, rw: u32, rh: u32) -> ResizePlan {
    match mode {
        ResizeMode::Width => {
            let width = rw.min(sw);
            let height = scale_round(width, sh, sw).max(1);
            if height > rh {
                // The secondary dimension caps the output
                let height = rh;
                let width = scale_round(height, sw, sh).max(1);
                ResizePlan::Scale { width, height }
            } else {
                ResizePlan::Scale { width, height }
            }
        }
        ResizeMode::Height => {
            let height = rh.min(sh);
            let width = scale_round(height, sw, sh).max(1);
            if width > rw {
                let width = rw;
                let height = scale_round(width, sh, sw).max(1);
                ResizePlan::Scale { width, height }
            } else {
                ResizePlan::Scale { width, height }
            }
        }
        ResizeMode::Square => {
            let side = rw.min(sw).min(sh);
            let crop_side = sw.min(sh);
            ResizePlan::CropThenScale {
                crop: CropWindow {
                    x: (sw - crop_side) / 2,
                    y: (sh - crop_side) / 2,
                    width: crop_side,
                    height: crop_side,
                },
                side,
            }
        }
        ResizeMode::Fill => {
            let scale = f64::max(rw as f64 / sw as f64, rh as f64 / sh as f64);
            let scaled_w = ((sw as f64 * scale).round() as u32).max(rw);
            let scaled_h = ((sh as f64 * scale).round() as u32).max(rh);
            let (x, y) = anchor(gravity, scaled_w - rw, scaled_h - rh);
            ResizePlan::ScaleThenCrop {
                width: scaled_w,
                height: scaled_h,
                crop: CropWindow {
                    x,
                    y,
                    width: rw,
                    height: rh,
                },
            }
        }
    }
}

/// Crop origin for a window smaller than the scaled source by `(dx, dy)`.
fn anchor(gravity: Gravity, dx: u32, dy: u32) -> (u32, u32) {
    match gravity {
        Gravity::Center => (dx / 2, dy / 2),
        Gravity::North => (dx / 2, 0),
        Gravity::South => (dx / 2, dy),
        Gravity::West => (0, dy / 2),
        Gravity::East => (dx, dy / 2),
        Gravity::Northwest => (0, 0),
        Gravity::Northeast => (dx, 0),
        Gravity::Southwest => (0, dy),
        Gravity::Southeast => (dx, dy),
    }
}

/// `round(value * num / den)`, half-up.
fn scale_round(value: u32, num: u32, den: u32) -> u32 {
    ((value as u64 * num as u64 + den as u64 / 2) / den as u64) as u32
}
