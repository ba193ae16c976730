//! The resize operation: geometry plan, scale, crop, watermark, encode.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::errors::ArionError;
use crate::image::geometry::{self, ResizePlan};
use crate::image::operations::watermark::{self, WatermarkPlan};
use crate::image::params::ResizeParams;
use crate::image::source::{resolve_url, SourceImage};
use crate::output::OperationReport;
use crate::utils::image_utils;

/// Execute one validated resize operation against the source.
pub fn run(source: &SourceImage, params: &ResizeParams) -> Result<OperationReport, ArionError> {
    let plan = geometry::plan(
        params.mode,
        params.gravity.unwrap_or_default(),
        source.width,
        source.height,
        params.width,
        params.height,
    );
    let mut output = execute_plan(&source.pixels, plan);

    if let Some(wm) = WatermarkPlan::from_params(params) {
        output = watermark::apply(output, &wm)?;
    }

    let path = resolve_url(&params.output_url);
    let format = image_utils::format_for_path(path)?;
    image_utils::save_image_to_path(&output, path, format, params.quality)?;

    let (width, height) = output.dimensions();
    let mut report = OperationReport::success("resize");
    report.output_url = Some(params.output_url.clone());
    report.output_width = Some(width);
    report.output_height = Some(height);
    Ok(report)
}

fn execute_plan(pixels: &DynamicImage, plan: ResizePlan) -> DynamicImage {
    match plan {
        ResizePlan::Scale { width, height } => {
            pixels.resize_exact(width, height, FilterType::Lanczos3)
        }
        ResizePlan::CropThenScale { crop, side } => pixels
            .crop_imm(crop.x, crop.y, crop.width, crop.height)
            .resize_exact(side, side, FilterType::Lanczos3),
        ResizePlan::ScaleThenCrop { width, height, crop } => pixels
            .resize_exact(width, height, FilterType::Lanczos3)
            .crop_imm(crop.x, crop.y, crop.width, crop.height),
    }
}
