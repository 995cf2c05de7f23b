//! Pixel extraction of a planned crop.
//!
//! The engine only produces a [`CropPlan`]; turning it into pixels is a pure
//! function of the plan and the source image, so it can run away from the
//! interaction thread.

use crate::engine::CropPlan;
use crate::error::CropperError;
use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

/// Resampling filter for scaling the cropped region to the output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor, fastest
    Nearest,
    /// Bilinear, good for previews
    #[default]
    Bilinear,
    /// Lanczos3, best for export
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's filter type.
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            FilterType::Nearest => imageops::FilterType::Nearest,
            FilterType::Bilinear => imageops::FilterType::Triangle,
            FilterType::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Wrap a packed RGB buffer, checking its length against the dimensions.
pub fn rgb_image_from_raw(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<RgbImage, CropperError> {
    if width == 0 || height == 0 {
        return Err(CropperError::EmptyImage { width, height });
    }
    let len = pixels.len();
    RgbImage::from_raw(width, height, pixels).ok_or(CropperError::PixelBufferMismatch {
        width,
        height,
        len,
    })
}

/// Copy the planned source region and scale it to the planned output size.
///
/// The source rectangle is clamped to the image and is never smaller than
/// 1x1, so a plan made for a different image still yields pixels.
pub fn extract_crop(image: &RgbImage, plan: &CropPlan, filter: FilterType) -> RgbImage {
    let (img_w, img_h) = image.dimensions();
    let src = plan.source;

    let x = src.x.min(img_w.saturating_sub(1));
    let y = src.y.min(img_h.saturating_sub(1));
    let width = src.width.min(img_w - x).max(1);
    let height = src.height.min(img_h - y).max(1);

    let region = imageops::crop_imm(image, x, y, width, height).to_image();

    let out_w = plan.output_width.max(1);
    let out_h = plan.output_height.max(1);
    if (out_w, out_h) == (width, height) {
        return region;
    }

    log::debug!(
        "scaling {}x{} crop to {}x{} ({:?})",
        width,
        height,
        out_w,
        out_h,
        filter
    );
    imageops::resize(&region, out_w, out_h, filter.to_image_filter())
}
