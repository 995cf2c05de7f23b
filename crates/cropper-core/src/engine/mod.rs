//! The crop-region engine.
//!
//! [`ImageCropper`] owns the markers, the active touches and the point pool,
//! and exposes the operations a host needs: configuration, image and canvas
//! changes, source-space crop bounds, and the pointer/touch handlers.
//!
//! # Module Structure
//!
//! - `resize` - aspect-locked and free corner dragging, minimum size
//! - `center` - translating the whole region
//! - `dispatch` - touch id to marker routing and cursor affordances
//! - `pinch` - two-finger grow/shrink
//!
//! # Invariants
//!
//! After every public operation:
//! - the four corners form a rectangle contained in the clamp rectangle
//! - with `keep_aspect`, height/width equals the configured aspect ratio
//! - width and height are at least the effective minimum size
//! - the center marker sits on the midpoint of the corners
//! - every point borrowed from the pool has been returned

mod center;
mod dispatch;
mod pinch;
mod resize;

pub use dispatch::{CropTouch, Cursor};

use crate::error::CropperError;
use crate::geometry::{Bounds, ClampRect, PixelRect, EPSILON};
use crate::marker::{Marker, MarkerSet};
use crate::pool::{PointPool, DEFAULT_CAPACITY};
use crate::settings::{is_positive, CropperSettings};
use crate::viewport::{ImageSize, Viewport};
use serde::{Deserialize, Serialize};

/// Source rectangle and output size of the current crop.
///
/// A plain snapshot: safe to hand to another thread for pixel work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPlan {
    /// Region of the source image, in pixels
    pub source: PixelRect,
    /// Width of the produced image
    pub output_width: u32,
    /// Height of the produced image
    pub output_height: u32,
}

/// Interactive crop-region engine.
#[derive(Debug)]
pub struct ImageCropper {
    settings: CropperSettings,
    keep_aspect: bool,
    /// Height over width of the crop rectangle
    aspect_ratio: f64,
    /// Minimum size in display pixels (resolved from settings)
    min_width: f64,
    min_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    /// Present exactly while an image is set
    viewport: Option<Viewport>,
    markers: MarkerSet,
    touches: Vec<CropTouch>,
    pool: PointPool,
    previous_distance: Option<f64>,
    interacting: bool,
}

impl ImageCropper {
    /// Create an engine with no image.
    pub fn new(settings: CropperSettings) -> Result<Self, CropperError> {
        settings.validate()?;
        let markers = MarkerSet::new(
            Bounds::new(0.0, 0.0, settings.width, settings.height),
            settings.touch_radius,
            settings.center_touch_radius,
        );
        Ok(Self {
            keep_aspect: settings.keep_aspect,
            aspect_ratio: settings.aspect_ratio(),
            min_width: settings.min_width,
            min_height: settings.min_height,
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            viewport: None,
            markers,
            touches: Vec::new(),
            pool: PointPool::new(DEFAULT_CAPACITY),
            previous_distance: None,
            interacting: false,
            settings,
        })
    }

    /// Reconfigure the crop shape and limits.
    ///
    /// With an image set, the crop is placed again from scratch.
    #[allow(clippy::too_many_arguments)]
    pub fn configure(
        &mut self,
        width: f64,
        height: f64,
        keep_aspect: bool,
        touch_radius: f64,
        min_width: f64,
        min_height: f64,
        cropped_width: u32,
        cropped_height: u32,
    ) -> Result<(), CropperError> {
        let settings = CropperSettings {
            width,
            height,
            keep_aspect,
            touch_radius,
            min_width,
            min_height,
            cropped_width,
            cropped_height,
            ..self.settings.clone()
        };
        self.update_settings(settings)?;

        // The previous crop shape must not leak into the new aspect ratio
        self.markers.place(Bounds::new(0.0, 0.0, width, height));
        if let Some(vp) = self.viewport {
            let initial = self.initial_bounds(&vp);
            self.markers.place(initial);
        }
        Ok(())
    }

    /// Replace the settings.
    ///
    /// With an image set, the crop is re-settled: under the aspect lock its
    /// height is re-derived from its width, then it is grown to the minimum
    /// size and fitted into the clamp rectangle.
    pub fn update_settings(&mut self, settings: CropperSettings) -> Result<(), CropperError> {
        settings.validate()?;
        log::debug!(
            "cropper settings: {}x{} keep_aspect={} min={}x{}",
            settings.width,
            settings.height,
            settings.keep_aspect,
            settings.min_width,
            settings.min_height
        );
        self.keep_aspect = settings.keep_aspect;
        self.aspect_ratio = settings.aspect_ratio();
        self.markers
            .set_touch_radii(settings.touch_radius, settings.center_touch_radius);
        let canvas = (settings.canvas_width, settings.canvas_height);
        self.settings = settings;
        self.resolve_min_size();

        if canvas != (self.canvas_width, self.canvas_height) {
            self.resize(canvas.0, canvas.1)?;
        }
        if let Some(vp) = self.viewport {
            let bounds = self.conform_ratio(self.markers.bounds());
            let bounds = self.settle(bounds, &vp.clamp());
            self.markers.place(bounds);
        }
        Ok(())
    }

    pub fn settings(&self) -> &CropperSettings {
        &self.settings
    }

    /// Set or clear the image. `None` makes every handler a no-op.
    pub fn set_image(&mut self, image: Option<ImageSize>) -> Result<(), CropperError> {
        let Some(image) = image else {
            self.clear_image();
            return Ok(());
        };

        if image.is_empty() {
            return Err(CropperError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }

        let vp = Viewport::fit(self.canvas_width, self.canvas_height, image);
        log::debug!(
            "cropper image {}x{} on {}x{} canvas, clamp {:?}",
            image.width,
            image.height,
            self.canvas_width,
            self.canvas_height,
            vp.clamp()
        );
        self.viewport = Some(vp);
        self.resolve_min_size();

        let initial = self.initial_bounds(&vp);
        self.markers.place(initial);
        Ok(())
    }

    /// Clear the image.
    pub fn reset(&mut self) {
        self.clear_image();
    }

    pub fn is_image_set(&self) -> bool {
        self.viewport.is_some()
    }

    /// Resize the drawing surface, keeping the crop on the same image region.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), CropperError> {
        if !is_positive(width) || !is_positive(height) {
            return Err(CropperError::InvalidCanvasSize { width, height });
        }
        self.canvas_width = width;
        self.canvas_height = height;
        self.settings.canvas_width = width;
        self.settings.canvas_height = height;

        let Some(old) = self.viewport else {
            return Ok(());
        };
        let source = old.to_source_exact(&self.markers.bounds());
        let vp = Viewport::fit(width, height, old.image());
        self.viewport = Some(vp);
        self.resolve_min_size();

        let bounds = self.settle(vp.to_display(&source), &vp.clamp());
        self.markers.place(bounds);
        log::debug!("cropper canvas resized to {}x{}", width, height);
        Ok(())
    }

    /// Crop rectangle in display coordinates.
    pub fn display_bounds(&self) -> Bounds {
        self.markers.bounds()
    }

    /// Crop rectangle in whole source-image pixels.
    pub fn crop_bounds(&self) -> Option<Bounds> {
        self.viewport
            .map(|vp| vp.to_source(&self.markers.bounds()))
    }

    /// Position the crop from a source-space rectangle.
    ///
    /// With `keep_aspect`, one side is re-derived from the other: if only one
    /// side differs from the current crop, the unchanged side follows it;
    /// otherwise the side whose correction perturbs the request less wins.
    pub fn update_crop_position(&mut self, bounds: Bounds) {
        let Some(vp) = self.viewport else {
            return;
        };

        let requested = vp.to_display(&bounds);
        let mut width = requested.width();
        let mut height = requested.height();

        if self.keep_aspect {
            let scaled_w = height / self.aspect_ratio;
            let scaled_h = width * self.aspect_ratio;
            let current = vp.to_source(&self.markers.bounds());

            if current.height() == bounds.height() {
                height = scaled_h;
            } else if current.width() == bounds.width() {
                width = scaled_w;
            } else if (scaled_h - height).abs() < (scaled_w - width).abs() {
                width = scaled_w;
            } else {
                height = scaled_h;
            }
        }

        let placed = self.settle(
            Bounds::from_origin_size(requested.left, requested.top, width, height),
            &vp.clamp(),
        );
        self.markers.place(placed);
    }

    /// Plan the pixel extraction of the current crop.
    pub fn crop_plan(&self) -> Option<CropPlan> {
        let vp = self.viewport?;
        let image = vp.image();
        let exact = vp.to_source_exact(&self.markers.bounds());

        let x = (exact.left.round().max(0.0) as u32).min(image.width - 1);
        let y = (exact.top.round().max(0.0) as u32).min(image.height - 1);
        let width = (exact.width().round().max(1.0) as u32).min(image.width - x);
        let height = (exact.height().round().max(1.0) as u32).min(image.height - y);

        let (output_width, output_height) = if self.settings.preserve_size {
            (width, height)
        } else {
            (
                self.settings.cropped_width.max(1),
                self.settings.cropped_height.max(1),
            )
        };

        Some(CropPlan {
            source: PixelRect {
                x,
                y,
                width,
                height,
            },
            output_width,
            output_height,
        })
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn center(&self) -> &Marker {
        self.markers.center()
    }

    pub fn clamp_rect(&self) -> Option<ClampRect> {
        self.viewport.map(|vp| vp.clamp())
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn keep_aspect(&self) -> bool {
        self.keep_aspect
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Whether a drag or pinch is in progress.
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Active touches, in press order.
    pub fn touches(&self) -> &[CropTouch] {
        &self.touches
    }

    pub fn pool(&self) -> &PointPool {
        &self.pool
    }

    /// Minimum width and height that still fit the clamp rectangle.
    pub(crate) fn min_size(&self, clamp: &ClampRect) -> (f64, f64) {
        if self.keep_aspect {
            let max_width = clamp.width().min(clamp.height() / self.aspect_ratio);
            (
                self.min_width.min(max_width),
                self.min_height.min(max_width * self.aspect_ratio),
            )
        } else {
            (
                self.min_width.min(clamp.width()),
                self.min_height.min(clamp.height()),
            )
        }
    }

    fn clear_image(&mut self) {
        log::debug!("cropper image cleared");
        self.viewport = None;
        self.touches.clear();
        self.markers.clear_flags();
        self.previous_distance = None;
        self.interacting = false;
    }

    /// Under the aspect lock, re-derive the height of `bounds` from its width
    /// around the same center.
    fn conform_ratio(&self, bounds: Bounds) -> Bounds {
        if !self.keep_aspect {
            return bounds;
        }
        let ratio_ok = bounds
            .aspect()
            .is_some_and(|r| (r - self.aspect_ratio).abs() <= EPSILON);
        if ratio_ok {
            return bounds;
        }
        let width = bounds.width();
        let height = width * self.aspect_ratio;
        let c = bounds.center();
        Bounds::from_origin_size(c.x - width / 2.0, c.y - height / 2.0, width, height)
    }

    fn resolve_min_size(&mut self) {
        match self.viewport {
            Some(vp) if self.settings.min_size_relative_to_resolution => {
                let image = vp.image();
                self.min_width =
                    self.canvas_width * self.settings.min_width / image.width as f64;
                self.min_height =
                    self.canvas_height * self.settings.min_height / image.height as f64;
            }
            _ => {
                self.min_width = self.settings.min_width;
                self.min_height = self.settings.min_height;
            }
        }
    }

    /// Centered starting crop for a freshly set image.
    fn initial_bounds(&self, vp: &Viewport) -> Bounds {
        let w = vp.canvas_width();
        let h = vp.canvas_height();
        let source_aspect = vp.image().aspect();
        let crop_aspect = if self.keep_aspect {
            self.aspect_ratio
        } else {
            self.markers.bounds().aspect().unwrap_or(self.aspect_ratio)
        };
        // A full-image crop would break the locked ratio
        let full = self.settings.show_full_crop_initial && !self.keep_aspect;
        let cx = w / 2.0;
        let cy = h / 2.0;

        let (crop_w, crop_h) = if crop_aspect > source_aspect {
            let image_h = (w * source_aspect).min(h);
            let crop_w = if full {
                (h / source_aspect).min(w)
            } else {
                image_h / crop_aspect
            };
            (crop_w, image_h)
        } else {
            let image_w = (h / source_aspect).min(w);
            let crop_h = if full {
                (w * source_aspect).min(h)
            } else {
                image_w * crop_aspect
            };
            (image_w, crop_h)
        };

        let bounds = Bounds::from_origin_size(cx - crop_w / 2.0, cy - crop_h / 2.0, crop_w, crop_h);
        self.settle(bounds, &vp.clamp())
    }

    /// Grow `bounds` to the minimum size around its center, then fit it inside `clamp`.
    fn settle(&self, bounds: Bounds, clamp: &ClampRect) -> Bounds {
        let (min_w, min_h) = self.min_size(clamp);
        let mut width = bounds.width();
        let mut height = bounds.height();

        if self.keep_aspect {
            if width < min_w {
                width = min_w;
                height = width * self.aspect_ratio;
            }
            if height < min_h {
                height = min_h;
                width = height / self.aspect_ratio;
            }
        } else {
            width = width.max(min_w);
            height = height.max(min_h);
        }

        let c = bounds.center();
        let grown = Bounds::from_origin_size(c.x - width / 2.0, c.y - height / 2.0, width, height);
        clamp.fit(grown, self.keep_aspect.then_some(self.aspect_ratio))
    }
}
