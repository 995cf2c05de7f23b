//! WASM bindings for the interactive crop engine.
//!
//! The host forwards canvas pointer events and draws from
//! `marker_positions()`; every handler returns the CSS cursor to apply.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const cropper = new JsImageCropper({ width: 16, height: 9, keep_aspect: true });
//! cropper.resize(canvas.width, canvas.height);
//! cropper.set_image(img.naturalWidth, img.naturalHeight);
//!
//! canvas.onpointerdown = (e) => {
//!   canvas.style.cursor = cropper.on_press(e.pointerId, e.offsetX, e.offsetY);
//! };
//! ```

use crate::types::{filter_from_u8, JsRgbImage};
use cropper_core::{
    extract_crop, rgb_image_from_raw, Bounds, CropperError, CropperSettings, ImageCropper,
    ImageSize,
};
use wasm_bindgen::prelude::*;

/// Bit set in `marker_flags()` for a marker being dragged.
pub const FLAG_DRAGGING: u8 = 1;
/// Bit set in `marker_flags()` for a hovered marker.
pub const FLAG_HOVERED: u8 = 2;

fn js_error(err: CropperError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Crop-region engine handle for JavaScript.
#[wasm_bindgen]
pub struct JsImageCropper {
    inner: ImageCropper,
}

#[wasm_bindgen]
impl JsImageCropper {
    /// Create an engine from a settings object. Missing fields take defaults;
    /// `undefined` or `null` uses all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<JsImageCropper, JsValue> {
        let settings = parse_settings(settings)?;
        Self::from_settings(settings).map_err(js_error)
    }

    /// Reconfigure shape and limits; re-places the crop if an image is set.
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
    ) -> Result<(), JsValue> {
        self.inner
            .configure(
                width,
                height,
                keep_aspect,
                touch_radius,
                min_width,
                min_height,
                cropped_width,
                cropped_height,
            )
            .map_err(js_error)
    }

    /// Replace all settings from a settings object.
    pub fn update_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings = parse_settings(settings)?;
        self.inner.update_settings(settings).map_err(js_error)
    }

    /// Current settings as a plain object.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.settings())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the image by its natural size.
    pub fn set_image(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .set_image(Some(ImageSize::new(width, height)))
            .map_err(js_error)
    }

    /// Remove the image; all handlers become no-ops.
    pub fn clear_image(&mut self) {
        self.inner.reset();
    }

    pub fn is_image_set(&self) -> bool {
        self.inner.is_image_set()
    }

    /// Resize the drawing surface.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.resize(width, height).map_err(js_error)
    }

    pub fn on_press(&mut self, id: u32, x: f64, y: f64) -> String {
        self.inner.on_press(id, x, y).css_name().to_string()
    }

    pub fn on_move(&mut self, id: u32, x: f64, y: f64) -> String {
        self.inner.on_move(id, x, y).css_name().to_string()
    }

    pub fn on_release(&mut self, id: u32) {
        self.inner.on_release(id);
    }

    pub fn on_hover(&mut self, x: f64, y: f64) -> String {
        self.inner.on_hover(x, y).css_name().to_string()
    }

    /// Two-finger frame. Returns whether the crop changed.
    pub fn on_pinch(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        self.inner.on_pinch(x0, y0, x1, y1)
    }

    pub fn is_interacting(&self) -> bool {
        self.inner.is_interacting()
    }

    /// Crop bounds in source pixels as `{left, top, right, bottom}`, or `null`.
    pub fn crop_bounds(&self) -> Result<JsValue, JsValue> {
        match self.inner.crop_bounds() {
            Some(bounds) => serde_wasm_bindgen::to_value(&bounds)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Position the crop from a source-pixel `{left, top, right, bottom}` object.
    pub fn update_crop_position(&mut self, bounds: JsValue) -> Result<(), JsValue> {
        let bounds: Bounds = serde_wasm_bindgen::from_value(bounds)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop bounds: {}", e)))?;
        self.inner.update_crop_position(bounds);
        Ok(())
    }

    /// Extraction plan as `{source: {x, y, width, height}, output_width, output_height}`, or `null`.
    pub fn crop_plan(&self) -> Result<JsValue, JsValue> {
        match self.inner.crop_plan() {
            Some(plan) => serde_wasm_bindgen::to_value(&plan)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Display-space positions as a `Float64Array`:
    /// `[tl.x, tl.y, tr.x, tr.y, bl.x, bl.y, br.x, br.y, center.x, center.y]`.
    pub fn marker_positions(&self) -> Vec<f64> {
        let markers = self.inner.markers();
        markers
            .corners()
            .iter()
            .chain(std::iter::once(markers.center()))
            .flat_map(|m| [m.position.x, m.position.y])
            .collect()
    }

    /// Drag/hover bits per marker, in `marker_positions()` order.
    pub fn marker_flags(&self) -> Vec<u8> {
        let markers = self.inner.markers();
        markers
            .corners()
            .iter()
            .chain(std::iter::once(markers.center()))
            .map(|m| {
                let mut flags = 0;
                if m.dragging {
                    flags |= FLAG_DRAGGING;
                }
                if m.hovered {
                    flags |= FLAG_HOVERED;
                }
                flags
            })
            .collect()
    }

    /// Visible image rectangle as `[min_x, max_x, min_y, max_y]`, empty without an image.
    pub fn clamp_rect(&self) -> Vec<f64> {
        self.inner
            .clamp_rect()
            .map(|c| vec![c.min_x, c.max_x, c.min_y, c.max_y])
            .unwrap_or_default()
    }

    /// Crop the given source pixels (packed RGB) and scale to the output size.
    ///
    /// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
    pub fn extract_crop(
        &self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        filter: u8,
    ) -> Result<JsRgbImage, JsValue> {
        self.extract(pixels, width, height, filter)
            .map_err(|e| JsValue::from_str(&e))
    }
}

impl JsImageCropper {
    pub(crate) fn from_settings(settings: CropperSettings) -> Result<Self, CropperError> {
        Ok(Self {
            inner: ImageCropper::new(settings)?,
        })
    }

    fn extract(
        &self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        filter: u8,
    ) -> Result<JsRgbImage, String> {
        let plan = self
            .inner
            .crop_plan()
            .ok_or_else(|| "No image set".to_string())?;
        let image = rgb_image_from_raw(width, height, pixels).map_err(|e| e.to_string())?;
        let cropped = extract_crop(&image, &plan, filter_from_u8(filter));
        let (w, h) = cropped.dimensions();
        Ok(JsRgbImage::from_buffer(w, h, cropped.into_raw()))
    }
}

fn parse_settings(value: JsValue) -> Result<CropperSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropperSettings::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid cropper settings: {}", e)))
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_undefined_uses_defaults() {
        let cropper = JsImageCropper::new(JsValue::UNDEFINED).unwrap();
        assert!(!cropper.is_image_set());
        assert!(cropper.crop_bounds().unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_crop_bounds_round_trip() {
        let settings = CropperSettings {
            canvas_width: 400.0,
            canvas_height: 300.0,
            keep_aspect: false,
            ..CropperSettings::default()
        };
        let js_settings = serde_wasm_bindgen::to_value(&settings).unwrap();
        let mut cropper = JsImageCropper::new(js_settings).unwrap();
        cropper.set_image(800, 600).unwrap();

        let bounds = Bounds::new(100.0, 100.0, 300.0, 500.0);
        cropper
            .update_crop_position(serde_wasm_bindgen::to_value(&bounds).unwrap())
            .unwrap();
        let back: Bounds = serde_wasm_bindgen::from_value(cropper.crop_bounds().unwrap()).unwrap();
        assert_eq!(back, bounds);
    }

    #[wasm_bindgen_test]
    fn test_invalid_settings_rejected() {
        let js_settings = serde_wasm_bindgen::to_value(&"not settings").unwrap();
        assert!(JsImageCropper::new(js_settings).is_err());
    }
}
