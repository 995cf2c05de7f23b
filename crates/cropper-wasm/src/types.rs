//! WASM-compatible wrapper types for image data.
//!
//! Pixels cross the boundary as packed RGB bytes (3 per pixel, row-major).

use cropper_core::FilterType;
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// The `free()` method can be called to release WASM memory early; otherwise
/// wasm-bindgen's finalizer cleans up.
#[wasm_bindgen]
pub struct JsRgbImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRgbImage {
    /// Create an image from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRgbImage {
        JsRgbImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGB pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRgbImage {
    /// Take ownership of a core image buffer.
    pub(crate) fn from_buffer(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// 0 = Nearest, 2 = Lanczos3, anything else = Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}
