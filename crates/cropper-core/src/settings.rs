//! Cropper configuration.
//!
//! Settings arrive as one serializable struct so the browser host can pass a
//! plain object. Missing fields fall back to the defaults below.

use crate::error::CropperError;
use serde::{Deserialize, Serialize};

/// Configuration for an [`ImageCropper`](crate::ImageCropper).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperSettings {
    /// Crop width; together with `height` defines the aspect ratio
    pub width: f64,
    /// Crop height
    pub height: f64,
    /// Lock the crop rectangle to `height / width`
    pub keep_aspect: bool,
    /// Half-size of the square hit region around each corner marker
    pub touch_radius: f64,
    /// Half-size of the square hit region around the center marker
    pub center_touch_radius: f64,
    /// Minimum crop width in display pixels
    pub min_width: f64,
    /// Minimum crop height in display pixels
    pub min_height: f64,
    /// Output width of the cropped image
    pub cropped_width: u32,
    /// Output height of the cropped image
    pub cropped_height: u32,
    /// Width of the drawing surface
    pub canvas_width: f64,
    /// Height of the drawing surface
    pub canvas_height: f64,
    /// Interpret `min_width`/`min_height` in source pixels instead of display pixels
    pub min_size_relative_to_resolution: bool,
    /// Start with the crop covering the whole image regardless of aspect
    pub show_full_crop_initial: bool,
    /// Output the crop at its source resolution instead of `cropped_width`x`cropped_height`
    pub preserve_size: bool,
}

impl Default for CropperSettings {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            keep_aspect: true,
            touch_radius: 20.0,
            center_touch_radius: 20.0,
            min_width: 50.0,
            min_height: 50.0,
            cropped_width: 100,
            cropped_height: 100,
            canvas_width: 300.0,
            canvas_height: 300.0,
            min_size_relative_to_resolution: false,
            show_full_crop_initial: false,
            preserve_size: false,
        }
    }
}

impl CropperSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Height over width of the crop rectangle.
    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }

    /// Check that every value can drive the engine.
    pub fn validate(&self) -> Result<(), CropperError> {
        if !is_positive(self.width) || !is_positive(self.height) {
            return Err(CropperError::InvalidCropSize {
                width: self.width,
                height: self.height,
            });
        }
        if !is_positive(self.canvas_width) || !is_positive(self.canvas_height) {
            return Err(CropperError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        for (name, value) in [
            ("touch_radius", self.touch_radius),
            ("center_touch_radius", self.center_touch_radius),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CropperError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
