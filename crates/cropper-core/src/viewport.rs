//! Mapping between display space and source-image space.
//!
//! The image is letterboxed into the canvas: scaled uniformly until it
//! touches either the canvas width or height, then centered. The displayed
//! image rectangle is the clamp rectangle that bounds every marker.

use crate::geometry::{Bounds, ClampRect};
use serde::{Deserialize, Serialize};

/// Natural pixel size of the image being cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of any image the `image` crate can view.
    pub fn of<I: image::GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Height over width.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }
}

/// Placement of an image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas_width: f64,
    canvas_height: f64,
    image: ImageSize,
    clamp: ClampRect,
    ratio_w: f64,
    ratio_h: f64,
}

impl Viewport {
    /// Letterbox-fit `image` into a `canvas_width` x `canvas_height` surface.
    pub fn fit(canvas_width: f64, canvas_height: f64, image: ImageSize) -> Self {
        let source_aspect = image.aspect();
        let canvas_aspect = canvas_height / canvas_width;

        let (w, h) = if canvas_aspect > source_aspect {
            (canvas_width, canvas_width * source_aspect)
        } else {
            (canvas_height / source_aspect, canvas_height)
        };

        let clamp = ClampRect::new(
            canvas_width / 2.0 - w / 2.0,
            canvas_width / 2.0 + w / 2.0,
            canvas_height / 2.0 - h / 2.0,
            canvas_height / 2.0 + h / 2.0,
        );

        Self {
            canvas_width,
            canvas_height,
            image,
            clamp,
            ratio_w: w / image.width as f64,
            ratio_h: h / image.height as f64,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    /// Display-space rectangle of the visible image.
    pub fn clamp(&self) -> ClampRect {
        self.clamp
    }

    /// Display pixels per source pixel, horizontally.
    pub fn ratio_w(&self) -> f64 {
        self.ratio_w
    }

    /// Display pixels per source pixel, vertically.
    pub fn ratio_h(&self) -> f64 {
        self.ratio_h
    }

    /// Clamp a display-space position into the visible image.
    pub fn clamp_position(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.clamp(self.clamp.min_x, self.clamp.max_x),
            y.clamp(self.clamp.min_y, self.clamp.max_y),
        )
    }

    /// Map display bounds to source pixels without rounding.
    pub fn to_source_exact(&self, bounds: &Bounds) -> Bounds {
        Bounds::new(
            (bounds.left - self.clamp.min_x) / self.ratio_w,
            (bounds.top - self.clamp.min_y) / self.ratio_h,
            (bounds.right - self.clamp.min_x) / self.ratio_w,
            (bounds.bottom - self.clamp.min_y) / self.ratio_h,
        )
    }

    /// Map display bounds to whole source pixels.
    pub fn to_source(&self, bounds: &Bounds) -> Bounds {
        let exact = self.to_source_exact(bounds);
        Bounds::new(
            exact.left.round(),
            exact.top.round(),
            exact.right.round(),
            exact.bottom.round(),
        )
    }

    /// Map source-pixel bounds back onto the display.
    pub fn to_display(&self, bounds: &Bounds) -> Bounds {
        Bounds::new(
            bounds.left * self.ratio_w + self.clamp.min_x,
            bounds.top * self.ratio_h + self.clamp.min_y,
            bounds.right * self.ratio_w + self.clamp.min_x,
            bounds.bottom * self.ratio_h + self.clamp.min_y,
        )
    }
}
